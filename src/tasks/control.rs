//! Control evaluation task.

use embassy_time::{Duration, Timer};
use log::{debug, info};

use crate::app::control::evaluate;
use crate::app::ports::ActuatorPort;
use crate::app::snapshot::SnapshotStore;
use crate::config::Thresholds;
use crate::tasks::Shutdown;

/// Evaluate the threshold rules every `interval` and command the relays.
///
/// Commands are issued unconditionally every cycle (open loop), so a
/// relay that missed or lost a command is re-commanded within one
/// interval. An unconfigured actuator slot (`None`) is simply skipped.
/// On shutdown all configured actuators are driven off before the task
/// returns.
pub async fn control_loop<F, P, L>(
    store: &SnapshotStore,
    thresholds: Thresholds,
    mut fan: Option<F>,
    mut pump: Option<P>,
    mut light: Option<L>,
    interval: Duration,
    shutdown: &Shutdown,
) where
    F: ActuatorPort,
    P: ActuatorPort,
    L: ActuatorPort,
{
    info!("control task started (every {} ms)", interval.as_millis());

    loop {
        Timer::after(interval).await;
        if shutdown.requested() {
            break;
        }

        let snapshot = store.read();
        let command = evaluate(&snapshot, &thresholds);

        if let Some(fan) = fan.as_mut() {
            fan.set_state(command.fan_on);
        }
        if let Some(pump) = pump.as_mut() {
            pump.set_state(command.pump_on);
        }
        if let Some(light) = light.as_mut() {
            light.set_state(command.light_on);
        }

        debug!(
            "control: fan={} pump={} light={}",
            command.fan_on, command.pump_on, command.light_on
        );
    }

    // Leave the greenhouse in a safe state.
    if let Some(fan) = fan.as_mut() {
        fan.turn_off();
    }
    if let Some(pump) = pump.as_mut() {
        pump.turn_off();
    }
    if let Some(light) = light.as_mut() {
        light.turn_off();
    }

    info!("control task stopped");
}
