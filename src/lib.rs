//! # rs-doorbell
//!
//! An MQTT doorbell notifier: a debounced button press is published to a
//! broker and acknowledged on one or two indicator LEDs.
//!
//! ## Features
//!
//! - **Hardware abstraction**: traits for the button line, indicator
//!   lines, delays, the broker client, and the config store
//! - **Debounced input**: a falling edge counts as a press only if the
//!   line stays active through a 50 ms sampling window
//! - **Named feedback patterns**: steady on/off, success blink, error
//!   blink, connect-retry burst, mirrored across both LEDs
//! - **Resilient startup**: broker connection retried indefinitely with
//!   a fixed 5 s delay; nothing in the press path can crash the process
//! - **Persisted configuration**: compiled-in defaults overlaid with a
//!   JSON record from NVS
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - hardware, messaging, and storage abstractions
//! - `config` - defaults, builders, and the persistence overlay
//! - `debounce` - the press validation window
//! - `indicator` - the LED pattern machine
//! - `doorbell` - the controller that ties everything together
//! - `hal` - concrete implementations (mock for testing, esp32 for
//!   hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_doorbell::{Config, Doorbell, Indicator, PressOutcome};
//! use rs_doorbell::hal::{MockDelay, MockIndicatorLine, MockMqtt};
//!
//! let config = Config::default().with_client_id("doorbell_a4cf12");
//!
//! let indicator = Indicator::pair(MockIndicatorLine::new(), MockIndicatorLine::new());
//! let mut bell = Doorbell::new(MockMqtt::new(), indicator, MockDelay::new(), &config);
//!
//! // Establish the broker connection (the mock accepts immediately)
//! bell.connect();
//!
//! // Service a validated press
//! assert_eq!(bell.handle_press(), PressOutcome::Published);
//! assert_eq!(bell.mqtt().published[0].0, "doorbell/doorbell_a4cf12");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Configuration model, defaults, and the persistence overlay.
pub mod config;
/// Debounced digital input for the doorbell button.
pub mod debounce;
/// The controller orchestrating input, feedback, and messaging.
pub mod doorbell;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// LED feedback patterns.
pub mod indicator;
/// Core traits for hardware, messaging, and persistence.
pub mod traits;

// Re-exports for convenience
pub use config::{derived_client_id, Config, LongString, ShortString, WifiConfig};
pub use debounce::{DebouncedInput, DEBOUNCE_SAMPLES, DEBOUNCE_SAMPLE_MS};
pub use doorbell::{Doorbell, PressOutcome, RunState, CONNECT_RETRY_DELAY_MS, PRESS_PAYLOAD};
pub use indicator::{Indicator, Pattern};
pub use traits::{
    ConfigStore, ConnectionState, Delay, IndicatorLine, InputLine, MqttPublisher,
};
