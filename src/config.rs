//! Runtime configuration: compiled-in defaults overlaid with a persisted record.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! The persisted record is a small JSON object stored at a well-known
//! location (see [`crate::traits::ConfigStore`]). Recognized keys override
//! the matching defaults; unrecognized keys are ignored. A missing or
//! corrupt record is never fatal: the defaults are used and written back.
//!
//! # Example
//!
//! ```rust
//! use rs_doorbell::config::{derived_client_id, Config};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.topic.as_str(), "doorbell");
//!
//! // Or customize
//! let config = Config::default()
//!     .with_broker("10.0.0.7")
//!     .with_client_id(derived_client_id(&[0xa4, 0xcf, 0x12]).as_str());
//! assert_eq!(config.wire_topic().as_str(), "doorbell/doorbell_a4cf12");
//! ```

use crate::traits::ConfigStore;
use core::fmt::Write as _;
use heapless::String as HString;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Maximum length for short config strings (hostnames, client IDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Maximum length for longer config strings (composed topics)
pub const MAX_LONG_STRING: usize = 128;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for longer config strings
pub type LongString = HString<MAX_LONG_STRING>;

/// Create a ShortString from a `&str`, truncating if too long.
///
/// Pushing char by char keeps truncation on a UTF-8 boundary.
pub fn short_string(s: &str) -> ShortString {
    let mut out = ShortString::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Derive the default client identifier from a per-device unique
/// hardware identifier (the station MAC on ESP32).
///
/// Two physical units never share a client id unless the persisted
/// configuration overrides it explicitly.
///
/// # Examples
///
/// ```
/// use rs_doorbell::config::derived_client_id;
///
/// let id = derived_client_id(&[0xa4, 0xcf, 0x12, 0x04, 0x7f, 0x30]);
/// assert_eq!(id.as_str(), "doorbell_a4cf12047f30");
/// ```
pub fn derived_client_id(uid: &[u8]) -> ShortString {
    let mut id = short_string("doorbell_");
    for byte in uid {
        let _ = write!(id, "{:02x}", byte);
    }
    id
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete device configuration.
///
/// Constructed once at startup and read-only afterwards. The broker,
/// pin, identity, and topic fields participate in the persistence
/// overlay; the Wi-Fi credentials are compiled in (env vars) and never
/// persisted.
#[derive(Clone, Debug)]
pub struct Config {
    /// Broker hostname or IP
    pub broker: ShortString,
    /// Broker port
    pub broker_port: u16,
    /// Doorbell button input pin (active low, pulled up)
    pub button_pin: i32,
    /// Primary indicator LED pin
    pub led_pin_1: i32,
    /// Secondary indicator LED pin; mirrors the primary when present
    pub led_pin_2: Option<i32>,
    /// Client identifier (unique per device, see [`derived_client_id`])
    pub client_id: ShortString,
    /// Topic name; the wire topic appends the client id
    pub topic: ShortString,
    /// Wi-Fi connection configuration (not persisted)
    pub wifi: WifiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker: short_string("192.168.1.50"),
            broker_port: 1883,
            button_pin: 12,
            led_pin_1: 14,
            led_pin_2: Some(16),
            client_id: short_string("doorbell"),
            topic: short_string("doorbell"),
            wifi: WifiConfig::default(),
        }
    }
}

impl Config {
    /// Set the broker host
    pub fn with_broker(mut self, host: &str) -> Self {
        self.broker = short_string(host);
        self
    }

    /// Set the broker port
    pub fn with_broker_port(mut self, port: u16) -> Self {
        self.broker_port = port;
        self
    }

    /// Set the button input pin
    pub fn with_button_pin(mut self, pin: i32) -> Self {
        self.button_pin = pin;
        self
    }

    /// Set the indicator LED pin(s)
    pub fn with_led_pins(mut self, first: i32, second: Option<i32>) -> Self {
        self.led_pin_1 = first;
        self.led_pin_2 = second;
        self
    }

    /// Set the client identifier
    pub fn with_client_id(mut self, id: &str) -> Self {
        self.client_id = short_string(id);
        self
    }

    /// Set the topic name
    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = short_string(topic);
        self
    }

    /// Set the Wi-Fi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Build the topic published on the wire: `<topic>/<client_id>`.
    pub fn wire_topic(&self) -> LongString {
        let mut topic = LongString::new();
        let _ = topic.push_str(self.topic.as_str());
        let _ = topic.push('/');
        let _ = topic.push_str(self.client_id.as_str());
        topic
    }

    // ========================================================================
    // Persistence overlay
    // ========================================================================

    /// Load the configuration: `defaults` overlaid with whatever the
    /// store holds.
    ///
    /// A missing, unreadable, or corrupt record falls back to the
    /// defaults and attempts to write them back (so the device carries a
    /// record to edit). This never fails and never aborts startup.
    pub fn load<S: ConfigStore>(store: &mut S, defaults: Config) -> Config {
        let raw = match store.read() {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("no stored configuration, using defaults");
                Self::save(store, &defaults);
                return defaults;
            }
            Err(e) => {
                warn!("couldn't read stored configuration: {:?}", e);
                Self::save(store, &defaults);
                return defaults;
            }
        };

        match serde_json::from_str::<PersistedConfig>(&raw) {
            Ok(record) => {
                info!("loaded stored configuration");
                defaults.overlaid(record)
            }
            Err(e) => {
                warn!("stored configuration is corrupt: {}", e);
                Self::save(store, &defaults);
                defaults
            }
        }
    }

    /// Serialize the full configuration back to the store.
    ///
    /// Failures are logged and ignored; the in-memory configuration
    /// stays authoritative either way.
    pub fn save<S: ConfigStore>(store: &mut S, config: &Config) {
        let record = PersistedConfig::from(config);
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = store.write(&json) {
                    warn!("couldn't save configuration: {:?}", e);
                }
            }
            Err(e) => warn!("couldn't serialize configuration: {}", e),
        }
    }

    fn overlaid(mut self, record: PersistedConfig) -> Config {
        if let Some(host) = record.broker {
            self.broker = host;
        }
        if let Some(port) = record.broker_port {
            self.broker_port = port;
        }
        if let Some(pin) = record.button_pin {
            self.button_pin = pin;
        }
        // `led_pin` configures a single line; `led_pin_1`/`led_pin_2`
        // configure the mirrored pair.
        if let Some(pin) = record.led_pin {
            self.led_pin_1 = pin;
            self.led_pin_2 = None;
        }
        if let Some(pin) = record.led_pin_1 {
            self.led_pin_1 = pin;
        }
        if let Some(pin) = record.led_pin_2 {
            self.led_pin_2 = Some(pin);
        }
        if let Some(id) = record.client_id {
            self.client_id = id;
        }
        if let Some(topic) = record.topic {
            self.topic = topic;
        }
        self
    }
}

/// The on-store JSON shape. Every field is optional on read; unknown
/// keys are ignored by serde. A single-line device uses `led_pin`, a
/// mirrored pair uses `led_pin_1`/`led_pin_2`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    broker: Option<ShortString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    broker_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    button_pin: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    led_pin: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    led_pin_1: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    led_pin_2: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<ShortString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<ShortString>,
}

impl From<&Config> for PersistedConfig {
    fn from(config: &Config) -> Self {
        let (led_pin, led_pin_1, led_pin_2) = match config.led_pin_2 {
            Some(second) => (None, Some(config.led_pin_1), Some(second)),
            None => (Some(config.led_pin_1), None, None),
        };
        Self {
            broker: Some(config.broker.clone()),
            broker_port: Some(config.broker_port),
            button_pin: Some(config.button_pin),
            led_pin,
            led_pin_1,
            led_pin_2,
            client_id: Some(config.client_id.clone()),
            topic: Some(config.topic.clone()),
        }
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// Wi-Fi station configuration.
///
/// Compiled in from environment variables by the firmware binary; an
/// unconfigured SSID skips network bring-up entirely (the broker connect
/// loop then retries until the network exists by other means).
#[derive(Clone, Debug, Default)]
pub struct WifiConfig {
    /// Network SSID
    pub ssid: ShortString,
    /// Network password
    pub password: ShortString,
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Check if credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
