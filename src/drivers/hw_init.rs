//! One-shot GPIO peripheral initialization.
//!
//! Configures the relay output pins using raw ESP-IDF sys calls. Called
//! once from `main()` before the task loops start. On non-espidf targets
//! every helper is a no-op so the drivers compile for host tests.

#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

// ── GPIO outputs ──────────────────────────────────────────────

/// Configure each pin as a push-pull output, driven low (relay off).
#[cfg(target_os = "espidf")]
pub fn init_outputs(output_pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in output_pins {
        // SAFETY: called once from main() before the task loops start;
        // plain register configuration with no aliasing concerns.
        unsafe {
            let ret = gpio_reset_pin(pin);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::GpioConfigFailed(ret));
            }
            let ret = gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::GpioConfigFailed(ret));
            }
            let ret = gpio_set_level(pin, 0);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::GpioConfigFailed(ret));
            }
        }
    }
    log::info!("hw_init: {} relay outputs configured", output_pins.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_outputs(output_pins: &[i32]) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {} outputs, init skipped", output_pins.len());
    Ok(())
}

/// Drive an output pin high or low.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output by init_outputs().
    let _ = unsafe { gpio_set_level(pin, u32::from(high)) };
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}
