//! The shared sensor snapshot and its single-writer/multi-reader store.
//!
//! Only the acquisition task writes; the control and publication tasks
//! each read an independent copy on their own cadence. A reader may see a
//! snapshot one acquisition cycle stale, but it must never see a
//! half-written mix of two updates, so both operations run inside one
//! short critical section.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor in the greenhouse.
///
/// Serializes to the flat wire document `{"temperature": …, "humidity": …,
/// "pressure": …, "light": …}` published to the broker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Air temperature (°C).
    #[serde(rename = "temperature")]
    pub temperature_c: f32,
    /// Relative humidity (%RH).
    #[serde(rename = "humidity")]
    pub humidity_pct: f32,
    /// Barometric pressure (hPa).
    #[serde(rename = "pressure")]
    pub pressure_hpa: f32,
    /// Ambient light level (lux).
    #[serde(rename = "light")]
    pub light_lux: f32,
}

impl SensorSnapshot {
    /// The all-zero snapshot every consumer sees before the first
    /// acquisition completes. Valid, if uninteresting, input.
    pub const ZERO: Self = Self {
        temperature_c: 0.0,
        humidity_pct: 0.0,
        pressure_hpa: 0.0,
        light_lux: 0.0,
    };
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::ZERO
    }
}

// ---------------------------------------------------------------------------
// Snapshot store
// ---------------------------------------------------------------------------

/// Holds the one current snapshot; supports atomic replace and atomic
/// read-copy.
///
/// `const fn new()` so the store can live in a `static` shared by the
/// three task loops.
pub struct SnapshotStore {
    current: Mutex<CriticalSectionRawMutex, Cell<SensorSnapshot>>,
}

impl SnapshotStore {
    pub const fn new() -> Self {
        Self {
            current: Mutex::new(Cell::new(SensorSnapshot::ZERO)),
        }
    }

    /// Replace the stored snapshot wholesale.
    pub fn update(&self, snapshot: SensorSnapshot) {
        self.current.lock(|cell| cell.set(snapshot));
    }

    /// Return an independent copy of the current snapshot.
    pub fn read(&self) -> SensorSnapshot {
        self.current.lock(Cell::get)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
