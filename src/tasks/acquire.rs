//! Sensor acquisition task.

use embassy_time::{Duration, Timer};
use log::{debug, info, warn};

use crate::app::ports::SensorPort;
use crate::app::snapshot::SnapshotStore;
use crate::tasks::Shutdown;

/// Read all sensors every `interval` and replace the shared snapshot.
///
/// A failed read skips the update; the previous snapshot stays in place
/// and the loop retries on the next cycle. Sensor faults never end this
/// task; only a shutdown request does.
pub async fn acquisition_loop(
    mut source: impl SensorPort,
    store: &SnapshotStore,
    interval: Duration,
    shutdown: &Shutdown,
) {
    info!("acquisition task started (every {} ms)", interval.as_millis());

    loop {
        Timer::after(interval).await;
        if shutdown.requested() {
            break;
        }

        match source.read_all() {
            Ok(snapshot) => {
                store.update(snapshot);
                debug!(
                    "acquired T={:.1}C RH={:.1}% P={:.1}hPa L={:.0}lx",
                    snapshot.temperature_c,
                    snapshot.humidity_pct,
                    snapshot.pressure_hpa,
                    snapshot.light_lux,
                );
            }
            Err(e) => {
                warn!("sensor read failed ({}); keeping previous snapshot", e);
            }
        }
    }

    info!("acquisition task stopped");
}
