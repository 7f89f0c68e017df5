//! MQTT broker adapter.
//!
//! Implements [`BrokerPort`], the publication task's view of the
//! network. Outbound snapshots go to `{prefix}/sensor_data`; the adapter
//! also carries the `{prefix}/control` subscription whose messages are
//! routed to the handler registered by the task.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real `EspMqttClient`; connection events
//!   are drained on a dedicated thread that logs session changes and
//!   dispatches inbound messages.
//! - **all other targets**: in-memory simulation recording published
//!   payloads for host-side tests.
//!
//! Reconnection is deliberately out of scope: when the session drops, the
//! publication task ends and the rest of the system keeps running.

use log::info;

use crate::app::ports::{BrokerPort, MessageHandler};
use crate::error::BrokerError;

#[cfg(target_os = "espidf")]
use std::sync::{Arc, Mutex};

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

pub struct MqttBroker {
    broker_url: String,
    client_id: String,
    #[cfg(target_os = "espidf")]
    client: Option<EspMqttClient<'static>>,
    /// Handler slot shared with the event thread; set by `subscribe`.
    #[cfg(target_os = "espidf")]
    inbound: Arc<Mutex<Option<MessageHandler>>>,
    #[cfg(not(target_os = "espidf"))]
    sim: SimSession,
}

impl MqttBroker {
    pub fn new(host: &str, port: u16, client_id: &str) -> Self {
        Self {
            broker_url: format!("mqtt://{}:{}", host, port),
            client_id: client_id.to_string(),
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            inbound: Arc::new(Mutex::new(None)),
            #[cfg(not(target_os = "espidf"))]
            sim: SimSession::default(),
        }
    }

    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl BrokerPort for MqttBroker {
    fn connect(&mut self) -> Result<(), BrokerError> {
        let conf = MqttClientConfiguration {
            client_id: Some(self.client_id.as_str()),
            ..Default::default()
        };
        let (client, mut connection) = EspMqttClient::new(&self.broker_url, &conf)
            .map_err(|_| BrokerError::ConnectFailed)?;

        // Drain connection events off the task loops; the MQTT stack
        // stalls if nobody consumes them.
        let inbound = Arc::clone(&self.inbound);
        std::thread::Builder::new()
            .name("mqtt-events".to_string())
            .stack_size(8 * 1024)
            .spawn(move || {
                while let Ok(event) = connection.next() {
                    match event.payload() {
                        EventPayload::Connected(_) => info!("mqtt session established"),
                        EventPayload::Disconnected => log::warn!("mqtt session lost"),
                        EventPayload::Received { topic, data, .. } => {
                            let handler = *inbound.lock().unwrap();
                            if let (Some(topic), Some(handler)) = (topic, handler) {
                                handler(topic, data);
                            }
                        }
                        _ => {}
                    }
                }
                info!("mqtt event thread ended");
            })
            .map_err(|_| BrokerError::ConnectFailed)?;

        info!("mqtt client created for {}", self.broker_url);
        self.client = Some(client);
        Ok(())
    }

    fn subscribe(&mut self, topic: &str, handler: MessageHandler) -> Result<(), BrokerError> {
        *self.inbound.lock().unwrap() = Some(handler);
        let client = self.client.as_mut().ok_or(BrokerError::NotConnected)?;
        client
            .subscribe(topic, QoS::AtLeastOnce)
            .map(|_| ())
            .map_err(|_| BrokerError::SubscribeFailed)
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        let client = self.client.as_mut().ok_or(BrokerError::NotConnected)?;
        client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .map(|_| ())
            .map_err(|_| BrokerError::PublishFailed)
    }

    fn disconnect(&mut self) {
        if self.client.take().is_some() {
            info!("mqtt client dropped");
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
struct SimSession {
    connected: bool,
    fail_next_connect: bool,
    published: Vec<(String, Vec<u8>)>,
    subscriptions: Vec<(String, MessageHandler)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttBroker {
    /// Make the next `connect()` fail, for failure-path tests.
    pub fn sim_fail_next_connect(&mut self) {
        self.sim.fail_next_connect = true;
    }

    pub fn sim_connected(&self) -> bool {
        self.sim.connected
    }

    pub fn sim_published(&self) -> &[(String, Vec<u8>)] {
        &self.sim.published
    }

    pub fn sim_subscribed_topics(&self) -> Vec<&str> {
        self.sim
            .subscriptions
            .iter()
            .map(|(topic, _)| topic.as_str())
            .collect()
    }

    /// Deliver an inbound message to every matching subscription.
    pub fn sim_inject(&self, topic: &str, payload: &[u8]) {
        for (subscribed, handler) in &self.sim.subscriptions {
            if subscribed == topic {
                handler(topic, payload);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl BrokerPort for MqttBroker {
    fn connect(&mut self) -> Result<(), BrokerError> {
        if self.sim.fail_next_connect {
            self.sim.fail_next_connect = false;
            return Err(BrokerError::ConnectFailed);
        }
        self.sim.connected = true;
        info!("mqtt(sim) connected to {} as '{}'", self.broker_url, self.client_id);
        Ok(())
    }

    fn subscribe(&mut self, topic: &str, handler: MessageHandler) -> Result<(), BrokerError> {
        if !self.sim.connected {
            return Err(BrokerError::NotConnected);
        }
        self.sim.subscriptions.push((topic.to_string(), handler));
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        if !self.sim.connected {
            return Err(BrokerError::NotConnected);
        }
        self.sim.published.push((topic.to_string(), payload.to_vec()));
        Ok(())
    }

    fn disconnect(&mut self) {
        self.sim.connected = false;
    }
}
