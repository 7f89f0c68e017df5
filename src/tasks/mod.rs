//! The three periodic task loops and their shared shutdown handle.
//!
//! ```text
//!              ┌──────────────┐
//!  SensorPort ─▶ acquisition  │──┐
//!              └──────────────┘  │ update
//!                                ▼
//!              ┌──────────────┐ SnapshotStore ┌──────────────┐
//!              │   control    │◀── read ──────│ publication  │
//!              └──────┬───────┘               └──────┬───────┘
//!                     ▼ set_state                    ▼ publish
//!               ActuatorPort ×3                  BrokerPort
//! ```
//!
//! Each loop runs on its own fixed interval and suspends only during its
//! own sleep; a stalled task never blocks the others. The only shared
//! state is the [`SnapshotStore`](crate::app::snapshot::SnapshotStore).
//! Cancellation is observed at every sleep boundary, so all tasks stop
//! within roughly one interval of a shutdown request.

pub mod acquire;
pub mod control;
pub mod publish;

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// One external cancellation signal shared by every task.
///
/// Task loops poll [`requested`](Self::requested) after each sleep; the
/// main loop parks on [`wait`](Self::wait) until some caller invokes
/// [`request`](Self::request).
pub struct Shutdown {
    requested: AtomicBool,
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            signal: Signal::new(),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
        self.signal.signal(());
    }

    /// Whether shutdown has been requested.
    pub fn requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        if self.requested() {
            return;
        }
        self.signal.wait().await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
