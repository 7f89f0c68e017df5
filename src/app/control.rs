//! Threshold decision procedure.
//!
//! A pure mapping from one sensor snapshot plus the configured thresholds
//! to the desired state of the three actuators. The control task applies
//! the result **every cycle**, open-loop rather than edge-triggered, so a
//! relay that missed a command gets re-commanded within one interval.

use crate::app::snapshot::SensorSnapshot;
use crate::config::Thresholds;

/// Desired actuator states for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorCommand {
    pub fan_on: bool,
    pub pump_on: bool,
    pub light_on: bool,
}

/// Evaluate the three threshold rules against a snapshot.
///
/// Each rule is independent of the others. Comparisons are strict: a
/// reading exactly at its threshold leaves the actuator off.
pub fn evaluate(snapshot: &SensorSnapshot, thresholds: &Thresholds) -> ActuatorCommand {
    ActuatorCommand {
        fan_on: snapshot.temperature_c > thresholds.max_temperature_c,
        pump_on: snapshot.humidity_pct < thresholds.min_humidity_pct,
        light_on: snapshot.light_lux < thresholds.min_light_lux,
    }
}
