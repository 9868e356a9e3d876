//! Messaging abstraction for the broker connection.
//!
//! The doorbell plays a publish-only MQTT client role: one persistent
//! connection to one broker, one topic, a fixed payload per press. The
//! trait models exactly that surface so the orchestrator can be tested
//! against a mock without a broker.
//!
//! # Retry policy
//!
//! [`MqttPublisher::connect`] makes a *single* attempt. Retry policy
//! (indefinite, fixed 5 s delay, LED burst between attempts) lives in the
//! orchestrator, not here. Likewise `publish` never reconnects: a broken
//! connection surfaces as an error and stays broken until the caller
//! decides otherwise.

/// Connection lifecycle of a [`MqttPublisher`].
///
/// Owned by the client; transitions only through explicit `connect`
/// attempts. There is no background reconnection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection is held.
    #[default]
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// A connection is established and usable for publishing.
    Connected,
}

impl ConnectionState {
    /// Returns the state as a lowercase string, for log lines.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }
}

/// Publish-only MQTT client.
///
/// Implementations hold at most one connection. Publishing while
/// disconnected is an error, never an implicit reconnect.
pub trait MqttPublisher {
    /// Error type for connect and publish failures.
    ///
    /// `Debug` so the orchestrator can log a failure it is about to
    /// swallow into LED feedback.
    type Error: core::fmt::Debug;

    /// Make one attempt to establish the transport and protocol handshake.
    ///
    /// An unreachable, unresponsive, or rejecting broker is an `Err`.
    /// No retry is performed here.
    fn connect(&mut self) -> Result<(), Self::Error>;

    /// Send `payload` to `topic` on the held connection.
    ///
    /// Any transport failure during send is an `Err`; the connection is
    /// left in whatever state the transport left it.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;

    /// Current connection lifecycle state.
    fn connection_state(&self) -> ConnectionState;

    /// True when a connection is established.
    fn is_connected(&self) -> bool {
        matches!(self.connection_state(), ConnectionState::Connected)
    }
}
