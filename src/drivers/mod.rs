//! Actuator drivers, hardware initialisation, and bus plumbing.

pub mod hw_init;
pub mod i2c_bus;
pub mod relay;
