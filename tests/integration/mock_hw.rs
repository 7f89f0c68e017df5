//! Mock port implementations for integration tests.
//!
//! Every mock shares its state through an `Arc` so a test can keep a
//! handle for inspection/mutation while the task loop owns the mock
//! itself (the loops take their ports by value).

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use greenhaus::app::ports::{ActuatorPort, BrokerPort, MessageHandler, SensorPort};
use greenhaus::app::snapshot::SensorSnapshot;
use greenhaus::error::{BrokerError, SensorError};

// ── Sensor source ─────────────────────────────────────────────

/// `SensorPort` whose reading and failure mode a test can change while
/// the acquisition loop runs.
#[derive(Clone)]
pub struct ScriptedSensor {
    inner: Arc<SensorState>,
}

struct SensorState {
    reading: Mutex<SensorSnapshot>,
    failing: AtomicBool,
    reads: AtomicU32,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(initial: SensorSnapshot) -> Self {
        Self {
            inner: Arc::new(SensorState {
                reading: Mutex::new(initial),
                failing: AtomicBool::new(false),
                reads: AtomicU32::new(0),
            }),
        }
    }

    pub fn set_reading(&self, snapshot: SensorSnapshot) {
        *self.inner.reading.lock().unwrap() = snapshot;
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Total `read_all` calls, successful or not.
    pub fn reads(&self) -> u32 {
        self.inner.reads.load(Ordering::SeqCst)
    }
}

impl SensorPort for ScriptedSensor {
    fn read_all(&mut self) -> Result<SensorSnapshot, SensorError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.load(Ordering::SeqCst) {
            Err(SensorError::Bus)
        } else {
            Ok(*self.inner.reading.lock().unwrap())
        }
    }
}

// ── Actuator ──────────────────────────────────────────────────

/// `ActuatorPort` recording every command in order.
#[derive(Clone)]
pub struct RecordingActuator {
    commands: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl RecordingActuator {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn commands(&self) -> Vec<bool> {
        self.commands.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<bool> {
        self.commands.lock().unwrap().last().copied()
    }
}

impl ActuatorPort for RecordingActuator {
    fn set_state(&mut self, on: bool) {
        self.commands.lock().unwrap().push(on);
    }
}

// ── Broker ────────────────────────────────────────────────────

/// `BrokerPort` recording session activity, with scriptable failures.
#[derive(Clone)]
pub struct RecordingBroker {
    inner: Arc<BrokerState>,
}

struct BrokerState {
    connected: AtomicBool,
    fail_connect: AtomicBool,
    fail_publish: AtomicBool,
    published: Mutex<Vec<(String, Vec<u8>)>>,
    subscribed: Mutex<Vec<String>>,
    disconnects: AtomicU32,
}

#[allow(dead_code)]
impl RecordingBroker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BrokerState {
                connected: AtomicBool::new(false),
                fail_connect: AtomicBool::new(false),
                fail_publish: AtomicBool::new(false),
                published: Mutex::new(Vec::new()),
                subscribed: Mutex::new(Vec::new()),
                disconnects: AtomicU32::new(0),
            }),
        }
    }

    pub fn fail_connect(&self) {
        self.inner.fail_connect.store(true, Ordering::SeqCst);
    }

    pub fn fail_publishes(&self) {
        self.inner.fail_publish.store(true, Ordering::SeqCst);
    }

    pub fn connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.inner.published.lock().unwrap().clone()
    }

    pub fn subscribed(&self) -> Vec<String> {
        self.inner.subscribed.lock().unwrap().clone()
    }

    pub fn disconnects(&self) -> u32 {
        self.inner.disconnects.load(Ordering::SeqCst)
    }
}

impl BrokerPort for RecordingBroker {
    fn connect(&mut self) -> Result<(), BrokerError> {
        if self.inner.fail_connect.load(Ordering::SeqCst) {
            return Err(BrokerError::ConnectFailed);
        }
        self.inner.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn subscribe(&mut self, topic: &str, _handler: MessageHandler) -> Result<(), BrokerError> {
        if !self.connected() {
            return Err(BrokerError::NotConnected);
        }
        self.inner.subscribed.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        if !self.connected() {
            return Err(BrokerError::NotConnected);
        }
        if self.inner.fail_publish.load(Ordering::SeqCst) {
            return Err(BrokerError::PublishFailed);
        }
        self.inner
            .published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload.to_vec()));
        Ok(())
    }

    fn disconnect(&mut self) {
        self.inner.connected.store(false, Ordering::SeqCst);
        self.inner.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}
