//! Port traits: the boundary between the domain core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ task loops (domain)
//! ```
//!
//! Driven adapters (sensor hub, relay drivers, MQTT client, config storage)
//! implement these traits. The task loops consume them via generics, so the
//! domain core never touches hardware or sockets directly.

use crate::app::snapshot::SensorSnapshot;
use crate::config::GreenhouseConfig;
use crate::error::{BrokerError, ConfigError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the acquisition task calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    ///
    /// A bus fault surfaces as [`SensorError`]; the caller is expected to
    /// keep the previous snapshot and retry on the next cycle.
    fn read_all(&mut self) -> Result<SensorSnapshot, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the control task calls this to command one actuator.
///
/// Commands are idempotent and assumed infallible at this layer; the
/// control loop re-issues them every cycle regardless of prior state.
pub trait ActuatorPort {
    /// Drive the actuator to the given state.
    fn set_state(&mut self, on: bool);

    fn turn_on(&mut self) {
        self.set_state(true);
    }

    fn turn_off(&mut self) {
        self.set_state(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Broker port (driven adapter: domain ↔ MQTT)
// ───────────────────────────────────────────────────────────────

/// Callback invoked for every message arriving on a subscribed topic.
pub type MessageHandler = fn(topic: &str, payload: &[u8]);

/// The publication task owns the broker session through this port.
///
/// Reconnection policy is the adapter's concern; the domain treats any
/// failure as fatal to publication and keeps the rest of the system
/// running.
pub trait BrokerPort {
    /// Establish the broker session.
    fn connect(&mut self) -> Result<(), BrokerError>;

    /// Subscribe to `topic`, routing inbound messages to `handler`.
    fn subscribe(&mut self, topic: &str, handler: MessageHandler) -> Result<(), BrokerError>;

    /// Publish `payload` to `topic`.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BrokerError>;

    /// Tear down the session. Safe to call when not connected.
    fn disconnect(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: persistent config → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the system configuration from persistent storage.
///
/// There is no save path: configuration is read once at boot and immutable
/// during operation.
pub trait ConfigPort {
    /// Load the stored configuration.
    /// Returns [`ConfigError::NotFound`] when no stored config exists.
    fn load(&self) -> Result<GreenhouseConfig, ConfigError>;
}
