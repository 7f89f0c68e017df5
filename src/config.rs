//! System configuration parameters
//!
//! All tunable parameters for the GreenHaus controller. Values can be
//! overridden via NVS (non-volatile storage); everything is read once at
//! startup and immutable during operation.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Threshold values driving the three actuator rules.
///
/// Comparisons are strict: a reading exactly at a threshold does **not**
/// activate the corresponding actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Fan turns on when temperature rises above this (°C).
    pub max_temperature_c: f32,
    /// Pump turns on when humidity falls below this (%RH).
    pub min_humidity_pct: f32,
    /// Grow-light turns on when ambient light falls below this (lux).
    pub min_light_lux: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_temperature_c: 30.0,
            min_humidity_pct: 40.0,
            min_light_lux: 200.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenhouseConfig {
    // --- Broker ---
    /// MQTT broker hostname or IP.
    pub broker_host: String,
    /// MQTT broker TCP port.
    pub broker_port: u16,
    /// Topic prefix identifying this deployment; readings go to
    /// `{prefix}/sensor_data`, inbound commands arrive on `{prefix}/control`.
    pub topic_prefix: String,
    /// MQTT client identifier.
    pub client_id: String,

    // --- WiFi ---
    pub wifi_ssid: String,
    pub wifi_password: String,

    // --- Sensor bus ---
    /// BME280 I²C address.
    pub bme280_addr: u8,
    /// BH1750 I²C address.
    pub bh1750_addr: u8,

    // --- Actuator pins ---
    pub fan_gpio: i32,
    pub pump_gpio: i32,
    pub grow_light_gpio: i32,

    // --- Timing ---
    /// Sensor acquisition interval (milliseconds)
    pub sensor_interval_ms: u32,
    /// Control evaluation interval (milliseconds)
    pub control_interval_ms: u32,
    /// Snapshot publication interval (milliseconds)
    pub publish_interval_ms: u32,

    // --- Control thresholds ---
    pub thresholds: Thresholds,
}

impl Default for GreenhouseConfig {
    fn default() -> Self {
        Self {
            // Broker
            broker_host: "test.mosquitto.org".to_string(),
            broker_port: 1883,
            topic_prefix: "greenhaus/dev01".to_string(),
            client_id: "greenhaus".to_string(),

            // WiFi: injected at build time, overridable via NVS
            wifi_ssid: option_env!("GREENHAUS_WIFI_SSID")
                .unwrap_or("")
                .to_string(),
            wifi_password: option_env!("GREENHAUS_WIFI_PASS")
                .unwrap_or("")
                .to_string(),

            // Sensor bus
            bme280_addr: pins::BME280_I2C_ADDR,
            bh1750_addr: pins::BH1750_I2C_ADDR,

            // Actuator pins
            fan_gpio: pins::FAN_RELAY_GPIO,
            pump_gpio: pins::PUMP_RELAY_GPIO,
            grow_light_gpio: pins::GROW_LIGHT_RELAY_GPIO,

            // Timing
            sensor_interval_ms: 5000,  // 0.2 Hz
            control_interval_ms: 2000, // 0.5 Hz
            publish_interval_ms: 5000, // 0.2 Hz

            thresholds: Thresholds::default(),
        }
    }
}

impl GreenhouseConfig {
    /// Outbound topic carrying the JSON snapshot.
    pub fn sensor_topic(&self) -> String {
        format!("{}/sensor_data", self.topic_prefix)
    }

    /// Inbound topic for control commands (logged only in this version).
    pub fn control_topic(&self) -> String {
        format!("{}/control", self.topic_prefix)
    }
}
