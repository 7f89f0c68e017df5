//! Binary relay actuator driver (active-high GPIO).
//!
//! One instance per actuator channel (fan, pump, grow-light). The driver
//! tracks the last commanded state for logging and test inspection, but
//! the hardware write happens on **every** command; callers rely on
//! re-commanding to recover a relay that missed a transition.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via the hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::app::ports::ActuatorPort;
use crate::drivers::hw_init;

pub struct RelayDriver {
    label: &'static str,
    gpio: i32,
    on: bool,
}

impl RelayDriver {
    /// Create a driver for the relay on `gpio`, initially off.
    ///
    /// The pin itself must have been configured by
    /// [`hw_init::init_outputs`] beforehand.
    pub fn new(label: &'static str, gpio: i32) -> Self {
        Self {
            label,
            gpio,
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    fn write_hw(&self, high: bool) {
        hw_init::gpio_write(self.gpio, high);
    }
}

impl ActuatorPort for RelayDriver {
    fn set_state(&mut self, on: bool) {
        self.write_hw(on);
        if on != self.on {
            debug!("{} relay -> {}", self.label, if on { "ON" } else { "OFF" });
        }
        self.on = on;
    }
}
