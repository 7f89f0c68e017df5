//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the GreenHaus controller:
//! the shared snapshot store and the threshold decision procedure. All
//! interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals or a broker.

pub mod control;
pub mod ports;
pub mod snapshot;
