//! MQTT client for the doorbell, publish-only role.
//!
//! Each [`connect`](crate::traits::MqttPublisher::connect) call builds a
//! fresh esp-idf MQTT client and watches its event stream on a
//! background thread; the call succeeds only once the broker handshake
//! is observed, and fails after a bounded wait otherwise. Retry policy
//! lives in the orchestrator, not here.
//!
//! A connection lost later surfaces as a publish error. The client
//! never repairs it on its own.

use crate::config::{Config, ShortString};
use crate::traits::{ConnectionState, MqttPublisher};
use esp_idf_svc::mqtt::client::{
    EspMqttClient, EspMqttConnection, EventPayload, MqttClientConfiguration, QoS,
};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long one connect attempt may wait for the broker handshake.
const CONNECT_TIMEOUT_MS: u32 = 10_000;
const CONNECT_POLL_MS: u32 = 100;

/// Error type for ESP32 MQTT operations.
#[derive(Debug)]
pub struct Esp32MqttError(pub String);

impl core::fmt::Display for Esp32MqttError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MQTT error: {}", self.0)
    }
}

/// Publish-only MQTT client over esp-idf-svc.
pub struct Esp32Mqtt {
    broker_url: String,
    client_id: ShortString,
    client: Option<EspMqttClient<'static>>,
    connected: Arc<AtomicBool>,
    state: ConnectionState,
}

impl Esp32Mqtt {
    /// Prepare a client for the configured broker. No connection is
    /// made until [`connect`](crate::traits::MqttPublisher::connect).
    pub fn new(config: &Config) -> Self {
        let broker_url = format!("mqtt://{}:{}", config.broker.as_str(), config.broker_port);
        Self {
            broker_url,
            client_id: config.client_id.clone(),
            client: None,
            connected: Arc::new(AtomicBool::new(false)),
            state: ConnectionState::Disconnected,
        }
    }

    fn fail(&mut self, message: String) -> Esp32MqttError {
        self.state = ConnectionState::Disconnected;
        Esp32MqttError(message)
    }
}

impl MqttPublisher for Esp32Mqtt {
    type Error = Esp32MqttError;

    fn connect(&mut self) -> Result<(), Self::Error> {
        self.state = ConnectionState::Connecting;
        self.connected.store(false, Ordering::Relaxed);
        self.client = None;

        let broker_url = self.broker_url.clone();
        let client_id = self.client_id.clone();
        let mqtt_config = MqttClientConfiguration {
            client_id: Some(client_id.as_str()),
            keep_alive_interval: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        let (client, mut connection) = EspMqttClient::new(&broker_url, &mqtt_config)
            .map_err(|e| self.fail(format!("client init: {e:?}")))?;

        let connected = self.connected.clone();
        thread::Builder::new()
            .stack_size(8192)
            .name("mqtt_events".into())
            .spawn(move || watch_connection(&mut connection, &connected))
            .map_err(|e| self.fail(format!("event thread: {e:?}")))?;

        // Bounded wait for the handshake; an unresponsive broker fails
        // the attempt rather than hanging startup.
        let mut waited = 0;
        while !self.connected.load(Ordering::Relaxed) {
            if waited >= CONNECT_TIMEOUT_MS {
                return Err(self.fail(format!(
                    "no broker handshake within {CONNECT_TIMEOUT_MS} ms"
                )));
            }
            thread::sleep(Duration::from_millis(CONNECT_POLL_MS as u64));
            waited += CONNECT_POLL_MS;
        }

        info!("connected to {}", self.broker_url);
        self.client = Some(client);
        self.state = ConnectionState::Connected;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        if !self.connected.load(Ordering::Relaxed) {
            return Err(self.fail("publish while disconnected".into()));
        }
        let client = self
            .client
            .as_mut()
            .ok_or_else(|| Esp32MqttError("publish before connect".into()))?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map_err(|e| Esp32MqttError(format!("send: {e:?}")))?;
        Ok(())
    }

    fn connection_state(&self) -> ConnectionState {
        match self.state {
            // The event thread may have seen a disconnect since
            ConnectionState::Connected if !self.connected.load(Ordering::Relaxed) => {
                ConnectionState::Disconnected
            }
            state => state,
        }
    }
}

fn watch_connection(connection: &mut EspMqttConnection, connected: &AtomicBool) {
    loop {
        match connection.next() {
            Ok(event) => match event.payload() {
                EventPayload::Connected(_) => {
                    connected.store(true, Ordering::Relaxed);
                }
                EventPayload::Disconnected => {
                    warn!("mqtt connection lost");
                    connected.store(false, Ordering::Relaxed);
                }
                EventPayload::Error(e) => warn!("mqtt event error: {:?}", e),
                _ => {}
            },
            Err(e) => {
                // Client dropped; the stream is over
                warn!("mqtt event stream closed: {:?}", e);
                connected.store(false, Ordering::Relaxed);
                break;
            }
        }
    }
}
