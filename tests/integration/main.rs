//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below exercises one slice of the system against mock port
//! implementations. Everything runs on the host with no hardware or
//! broker attached.

#![cfg(not(target_os = "espidf"))]

mod control_cycle_tests;
mod mock_hw;
