//! The doorbell controller: wires input, feedback, and messaging together.
//!
//! Startup walks three states: *booting* (configuration and hardware in
//! place, indicator steady-on meaning "powered, not yet ready"),
//! *awaiting-connection* (connect attempts against the broker, retried
//! indefinitely with a fixed delay and an LED burst between attempts),
//! and *ready* (all further work happens per press).
//!
//! Each validated press publishes one fixed payload and answers with the
//! success or error blink. A publish failure is consumed here — logged,
//! shown on the LED, and otherwise dropped. The handler never panics the
//! process and never repairs the connection; the next press simply tries
//! again against whatever state the transport is in.
//!
//! # Example
//!
//! ```rust
//! use rs_doorbell::{Config, Doorbell, Indicator, PressOutcome};
//! use rs_doorbell::hal::{MockDelay, MockIndicatorLine, MockMqtt};
//!
//! let config = Config::default();
//! let indicator = Indicator::pair(MockIndicatorLine::new(), MockIndicatorLine::new());
//! let mut bell = Doorbell::new(MockMqtt::new(), indicator, MockDelay::new(), &config);
//!
//! bell.connect(); // the mock accepts the first attempt
//! assert_eq!(bell.handle_press(), PressOutcome::Published);
//! assert_eq!(bell.mqtt().published.len(), 1);
//! ```

use crate::config::{Config, LongString};
use crate::indicator::{Indicator, Pattern};
use crate::traits::{Delay, IndicatorLine, MqttPublisher};
use log::{info, warn};

/// Wait between broker connect attempts, in milliseconds.
pub const CONNECT_RETRY_DELAY_MS: u32 = 5_000;

/// Payload published for every press. Subscribers match this token
/// verbatim; it is not JSON.
pub const PRESS_PAYLOAD: &[u8] = b"{'button': 'pressed'}";

/// Controller lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Hardware and configuration set up, broker not yet attempted.
    Booting,
    /// Connect attempts in progress.
    AwaitingConnection,
    /// Connected; press handling is the only remaining activity.
    Ready,
}

/// Outcome of servicing one validated press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press event reached the broker.
    Published,
    /// Publishing failed; the error blink was played and the failure
    /// dropped.
    PublishFailed,
}

/// The doorbell controller.
///
/// Owns the messaging client, the indicator, and the delay source.
/// Exactly one execution context drives a controller at a time, so no
/// locking is involved; a press being serviced blocks any later press.
pub struct Doorbell<M: MqttPublisher, L: IndicatorLine, D: Delay> {
    mqtt: M,
    indicator: Indicator<L>,
    delay: D,
    topic: LongString,
    run_state: RunState,
}

impl<M: MqttPublisher, L: IndicatorLine, D: Delay> Doorbell<M, L, D> {
    /// Assemble the controller and show the powered-up indication.
    pub fn new(mqtt: M, mut indicator: Indicator<L>, mut delay: D, config: &Config) -> Self {
        indicator.apply(Pattern::SteadyOn, &mut delay);
        Self {
            mqtt,
            indicator,
            delay,
            topic: config.wire_topic(),
            run_state: RunState::Booting,
        }
    }

    /// Connect to the broker, retrying indefinitely.
    ///
    /// Each failed attempt plays the [`Pattern::ConnectRetry`] burst and
    /// waits [`CONNECT_RETRY_DELAY_MS`] before the next one. There is no
    /// attempt cap and no escalating backoff; the method returns only
    /// once connected.
    pub fn connect(&mut self) {
        self.run_state = RunState::AwaitingConnection;
        loop {
            match self.mqtt.connect() {
                Ok(()) => {
                    info!("broker connection established");
                    self.run_state = RunState::Ready;
                    return;
                }
                Err(e) => {
                    warn!(
                        "broker not reachable, retrying in {}s: {:?}",
                        CONNECT_RETRY_DELAY_MS / 1000,
                        e
                    );
                    self.indicator.apply(Pattern::ConnectRetry, &mut self.delay);
                    self.delay.delay_ms(CONNECT_RETRY_DELAY_MS);
                }
            }
        }
    }

    /// Service one validated press.
    ///
    /// Publishes [`PRESS_PAYLOAD`] to the wire topic and plays the
    /// matching feedback pattern. A failure of any kind degrades to the
    /// error blink and a normal return — nothing propagates out of the
    /// press path, and no reconnect is attempted here.
    pub fn handle_press(&mut self) -> PressOutcome {
        info!("button pressed");
        match self.mqtt.publish(self.topic.as_str(), PRESS_PAYLOAD) {
            Ok(()) => {
                info!("press published to {}", self.topic.as_str());
                self.indicator.apply(Pattern::SuccessBlink, &mut self.delay);
                PressOutcome::Published
            }
            Err(e) => {
                warn!("publish failed: {:?}", e);
                self.indicator.apply(Pattern::ErrorBlink, &mut self.delay);
                PressOutcome::PublishFailed
            }
        }
    }

    /// Current lifecycle state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Borrow the messaging client (test inspection).
    pub fn mqtt(&self) -> &M {
        &self.mqtt
    }

    /// Mutably borrow the messaging client.
    pub fn mqtt_mut(&mut self) -> &mut M {
        &mut self.mqtt
    }

    /// Borrow the indicator.
    pub fn indicator(&self) -> &Indicator<L> {
        &self.indicator
    }

    /// Borrow the delay source (test inspection).
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Topic the controller publishes to.
    pub fn wire_topic(&self) -> &str {
        self.topic.as_str()
    }
}
