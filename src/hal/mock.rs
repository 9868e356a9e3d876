//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every trait seam, enabling
//! development and testing on desktop without a button, LEDs, or a
//! broker. All mocks expose public fields for inspection.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockInputLine`] | [`InputLine`] | Scripted level sequence |
//! | [`MockIndicatorLine`] | [`IndicatorLine`] | Records every write |
//! | [`MockDelay`] | [`Delay`] | Records sleeps instead of sleeping |
//! | [`MockMqtt`] | [`MqttPublisher`] | Scripted connect/publish outcomes |
//! | [`MockStore`] | [`ConfigStore`] | In-memory record with failure switches |
//!
//! [`InputLine`]: crate::traits::InputLine
//! [`IndicatorLine`]: crate::traits::IndicatorLine
//! [`Delay`]: crate::traits::Delay
//! [`MqttPublisher`]: crate::traits::MqttPublisher
//! [`ConfigStore`]: crate::traits::ConfigStore

use crate::traits::{ConfigStore, ConnectionState, Delay, IndicatorLine, InputLine, MqttPublisher};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock input line with a scripted level sequence.
///
/// Each [`InputLine::is_active`] call consumes the next queued level;
/// once the queue is empty the line reports [`rest`](Self::rest).
///
/// # Example
///
/// ```rust
/// use rs_doorbell::hal::MockInputLine;
/// use rs_doorbell::traits::InputLine;
///
/// let mut line = MockInputLine::new();
/// line.queue_levels(&[true, false]);
/// line.rest = true;
///
/// assert!(line.is_active());
/// assert!(!line.is_active());
/// assert!(line.is_active()); // queue exhausted, rest level
/// ```
#[derive(Debug, Default)]
pub struct MockInputLine {
    levels: Vec<bool>,
    /// Level reported after the queue is exhausted.
    pub rest: bool,
}

impl MockInputLine {
    /// Creates a line with an empty queue, resting inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a line held at a constant level.
    pub fn held(active: bool) -> Self {
        Self {
            levels: Vec::new(),
            rest: active,
        }
    }

    /// Queue one level sample (`true` = active).
    pub fn queue_level(&mut self, active: bool) {
        self.levels.push(active);
    }

    /// Queue several level samples in order.
    pub fn queue_levels(&mut self, levels: &[bool]) {
        self.levels.extend_from_slice(levels);
    }
}

impl InputLine for MockInputLine {
    fn is_active(&mut self) -> bool {
        if self.levels.is_empty() {
            self.rest
        } else {
            self.levels.remove(0)
        }
    }
}

/// Mock indicator line that records every write.
///
/// # Example
///
/// ```rust
/// use rs_doorbell::hal::MockIndicatorLine;
/// use rs_doorbell::traits::IndicatorLine;
///
/// let mut line = MockIndicatorLine::new();
/// line.set_high();
/// line.set_low();
///
/// assert!(!line.level);
/// assert_eq!(line.history, vec![true, false]);
/// ```
#[derive(Debug, Default)]
pub struct MockIndicatorLine {
    /// Current logic level.
    pub level: bool,
    /// Every level ever written, in order.
    pub history: Vec<bool>,
}

impl MockIndicatorLine {
    /// Creates a line at low level with empty history.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorLine for MockIndicatorLine {
    fn set_high(&mut self) {
        self.level = true;
        self.history.push(true);
    }

    fn set_low(&mut self) {
        self.level = false;
        self.history.push(false);
    }
}

/// Mock delay that records requested sleeps instead of sleeping.
///
/// # Example
///
/// ```rust
/// use rs_doorbell::hal::MockDelay;
/// use rs_doorbell::traits::Delay;
///
/// let mut delay = MockDelay::new();
/// delay.delay_ms(200);
/// delay.delay_ms(200);
/// delay.delay_ms(50);
///
/// assert_eq!(delay.total_ms(), 450);
/// assert_eq!(delay.count_of(200), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Every requested sleep, in order, in milliseconds.
    pub slept: Vec<u32>,
}

impl MockDelay {
    /// Creates a delay with no recorded sleeps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time slept, in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.slept.iter().map(|ms| *ms as u64).sum()
    }

    /// Number of recorded sleeps of exactly `ms` milliseconds.
    pub fn count_of(&self, ms: u32) -> usize {
        self.slept.iter().filter(|slept| **slept == ms).count()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.slept.push(ms);
    }
}

// ============================================================================
// Network Mocks
// ============================================================================

/// Error produced by [`MockMqtt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockMqttError(pub &'static str);

/// Mock MQTT client with scripted connect and publish outcomes.
///
/// Starts disconnected; [`MqttPublisher::connect`] succeeds once the
/// configured number of failures is used up. Published messages are
/// recorded for inspection.
///
/// # Example
///
/// ```rust
/// use rs_doorbell::hal::MockMqtt;
/// use rs_doorbell::traits::MqttPublisher;
///
/// let mut mqtt = MockMqtt::failing_connects(1);
/// assert!(mqtt.connect().is_err());
/// assert!(mqtt.connect().is_ok());
///
/// mqtt.publish("doorbell/unit1", b"ding").unwrap();
/// assert_eq!(mqtt.published_to("doorbell/unit1").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockMqtt {
    /// Messages that have been published (topic, payload).
    pub published: Vec<(String, Vec<u8>)>,
    /// Number of connect attempts made so far.
    pub connect_attempts: usize,
    /// Connect attempts left that will fail before one succeeds.
    pub connect_failures_remaining: usize,
    /// When true, every publish fails with a transport error.
    pub fail_publish: bool,
    state: ConnectionState,
}

impl MockMqtt {
    /// Creates a client whose first connect attempt succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that refuses the first `n` connect attempts.
    pub fn failing_connects(n: usize) -> Self {
        Self {
            connect_failures_remaining: n,
            ..Self::default()
        }
    }

    /// Get published messages for a topic.
    pub fn published_to(&self, topic: &str) -> Vec<&(String, Vec<u8>)> {
        self.published.iter().filter(|(t, _)| t == topic).collect()
    }

    /// Drop the connection, as a broken transport would.
    pub fn drop_connection(&mut self) {
        self.state = ConnectionState::Disconnected;
    }
}

impl MqttPublisher for MockMqtt {
    type Error = MockMqttError;

    fn connect(&mut self) -> Result<(), Self::Error> {
        self.connect_attempts += 1;
        self.state = ConnectionState::Connecting;
        if self.connect_failures_remaining > 0 {
            self.connect_failures_remaining -= 1;
            self.state = ConnectionState::Disconnected;
            return Err(MockMqttError("broker refused connection"));
        }
        self.state = ConnectionState::Connected;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        if !self.is_connected() {
            return Err(MockMqttError("publish while disconnected"));
        }
        if self.fail_publish {
            return Err(MockMqttError("transport broken during send"));
        }
        self.published.push((topic.into(), payload.to_vec()));
        Ok(())
    }

    fn connection_state(&self) -> ConnectionState {
        self.state
    }
}

// ============================================================================
// Storage Mocks
// ============================================================================

/// Error produced by [`MockStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockStoreError(pub &'static str);

/// In-memory configuration store with failure switches.
#[derive(Debug, Default)]
pub struct MockStore {
    /// The stored record, if any.
    pub contents: Option<String>,
    /// When true, every read fails.
    pub fail_read: bool,
    /// When true, every write fails.
    pub fail_write: bool,
    /// Number of write attempts (including failed ones).
    pub writes: usize,
}

impl MockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `contents`.
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }
}

impl ConfigStore for MockStore {
    type Error = MockStoreError;

    fn read(&mut self) -> Result<Option<String>, Self::Error> {
        if self.fail_read {
            return Err(MockStoreError("read failed"));
        }
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), Self::Error> {
        self.writes += 1;
        if self.fail_write {
            return Err(MockStoreError("write failed"));
        }
        self.contents = Some(contents.into());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_input_line_queue_then_rest() {
        let mut line = MockInputLine::new();
        line.queue_levels(&[true, true, false]);
        line.rest = true;

        assert!(line.is_active());
        assert!(line.is_active());
        assert!(!line.is_active());
        assert!(line.is_active()); // rest level from here on
        assert!(line.is_active());
    }

    #[test]
    fn mock_input_line_held() {
        let mut held = MockInputLine::held(true);
        for _ in 0..100 {
            assert!(held.is_active());
        }
    }

    #[test]
    fn mock_indicator_line_records_history() {
        let mut line = MockIndicatorLine::new();
        line.set_high();
        line.set_high();
        line.set_low();
        assert!(!line.level);
        assert_eq!(line.history, alloc::vec![true, true, false]);
    }

    #[test]
    fn mock_delay_accounting() {
        let mut delay = MockDelay::new();
        delay.delay_ms(1);
        delay.delay_ms(1);
        delay.delay_ms(5_000);
        assert_eq!(delay.total_ms(), 5_002);
        assert_eq!(delay.count_of(1), 2);
        assert_eq!(delay.count_of(5_000), 1);
        assert_eq!(delay.count_of(7), 0);
    }

    #[test]
    fn mock_mqtt_connect_script() {
        let mut mqtt = MockMqtt::failing_connects(2);
        assert_eq!(mqtt.connection_state(), ConnectionState::Disconnected);

        assert!(mqtt.connect().is_err());
        assert!(mqtt.connect().is_err());
        assert!(mqtt.connect().is_ok());
        assert_eq!(mqtt.connect_attempts, 3);
        assert_eq!(mqtt.connection_state(), ConnectionState::Connected);
    }

    #[test]
    fn mock_mqtt_publish_requires_connection() {
        let mut mqtt = MockMqtt::new();
        assert_eq!(
            mqtt.publish("doorbell/x", b"ding"),
            Err(MockMqttError("publish while disconnected"))
        );

        mqtt.connect().unwrap();
        mqtt.publish("doorbell/x", b"ding").unwrap();
        assert_eq!(mqtt.published.len(), 1);
        assert_eq!(mqtt.published[0].0, "doorbell/x");
        assert_eq!(mqtt.published[0].1, b"ding");
    }

    #[test]
    fn mock_mqtt_dropped_connection_fails_publish() {
        let mut mqtt = MockMqtt::new();
        mqtt.connect().unwrap();
        mqtt.drop_connection();
        assert!(mqtt.publish("doorbell/x", b"ding").is_err());
    }

    #[test]
    fn mock_store_read_write() {
        let mut store = MockStore::new();
        assert_eq!(store.read(), Ok(None));

        store.write("{}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{}"));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn mock_store_failure_switches() {
        let mut store = MockStore::with_contents("{}");
        store.fail_read = true;
        assert!(store.read().is_err());

        store.fail_write = true;
        assert!(store.write("x").is_err());
        assert_eq!(store.writes, 1);
        // Contents untouched by the failed write
        assert_eq!(store.contents.as_deref(), Some("{}"));
    }
}
