//! Snapshot publication task.

use embassy_time::{Duration, Timer};
use log::{debug, error, info};

use crate::app::ports::BrokerPort;
use crate::app::snapshot::SnapshotStore;
use crate::tasks::Shutdown;

/// Own the broker session and push the latest snapshot out every `interval`.
///
/// Connect and subscribe failures are fatal to this task only: it logs
/// and returns while control and acquisition keep running. A publish
/// failure is treated as a lost connection and ends the task the same
/// way; reconnect policy belongs to the broker client, not this loop.
/// There is no queue of missed readings: each tick publishes whatever the
/// store holds at that moment.
pub async fn publication_loop(
    mut broker: impl BrokerPort,
    store: &SnapshotStore,
    sensor_topic: String,
    control_topic: String,
    interval: Duration,
    shutdown: &Shutdown,
) {
    if let Err(e) = broker.connect() {
        error!("broker connect failed ({}); publication disabled", e);
        return;
    }
    if let Err(e) = broker.subscribe(&control_topic, log_control_message) {
        error!(
            "subscribe to '{}' failed ({}); publication disabled",
            control_topic, e
        );
        broker.disconnect();
        return;
    }

    info!(
        "publication task started ('{}' every {} ms)",
        sensor_topic,
        interval.as_millis()
    );

    loop {
        Timer::after(interval).await;
        if shutdown.requested() {
            break;
        }

        let snapshot = store.read();
        let payload = match serde_json::to_vec(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                error!("snapshot serialization failed: {}", e);
                continue;
            }
        };

        if let Err(e) = broker.publish(&sensor_topic, &payload) {
            error!(
                "publish to '{}' failed ({}); stopping publication task",
                sensor_topic, e
            );
            broker.disconnect();
            return;
        }
        debug!("published {} bytes to '{}'", payload.len(), sensor_topic);
    }

    broker.disconnect();
    info!("publication task stopped");
}

/// Inbound control messages are logged only; acting on them is a
/// forward-compatibility hook for a later version.
fn log_control_message(topic: &str, payload: &[u8]) {
    match core::str::from_utf8(payload) {
        Ok(text) => info!("control message on '{}': {}", topic, text),
        Err(_) => info!("control message on '{}': {} binary bytes", topic, payload.len()),
    }
}
