//! Driven adapters: implementations of the port traits against the real
//! platform (ESP-IDF WiFi / MQTT / NVS), with host-side simulation where
//! it keeps the code testable.

pub mod mqtt;
pub mod nvs;
pub mod wifi;
