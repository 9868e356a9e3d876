//! ESP32 hardware abstraction layer for the doorbell.
//!
//! Implementations of the crate's trait seams on top of esp-idf.
//!
//! # Hardware Configuration
//!
//! - **MCU**: any ESP32 with Wi-Fi (esp-idf, std)
//! - **Button**: momentary switch to ground on a pulled-up GPIO
//!   (default GPIO12)
//! - **Indicator**: one or two LEDs on GPIO outputs (default GPIO14 and
//!   GPIO16, driven in lockstep)
//!
//! Pin numbers come from [`crate::config::Config`] at runtime rather
//! than from compile-time pin types, so a persisted record can rewire a
//! device without reflashing.

mod button;
mod delay;
mod led;
mod storage;

pub use button::Esp32Button;
pub use delay::Esp32Delay;
pub use led::Esp32Led;
pub use storage::NvsConfigStore;

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

#[cfg(feature = "esp32-mqtt")]
mod mqtt;
#[cfg(feature = "esp32-mqtt")]
pub use mqtt::{Esp32Mqtt, Esp32MqttError};

/// Read the station MAC address, the per-device unique identifier the
/// default client id is derived from.
pub fn station_mac() -> [u8; 6] {
    let mut mac = [0u8; 6];
    // esp_read_mac is a simple register/efuse read
    unsafe {
        esp_idf_hal::sys::esp_read_mac(
            mac.as_mut_ptr(),
            esp_idf_hal::sys::esp_mac_type_t_ESP_MAC_WIFI_STA,
        );
    }
    mac
}
