//! ESP32 doorbell notifier firmware.
//!
//! Composition root: everything is constructed here and handed to the
//! one loop that needs it — no global singletons. Startup brings up
//! configuration, LEDs, the button interrupt, Wi-Fi, and the broker
//! connection (retrying forever), then services presses for the life of
//! the process.
//!
//! # Build
//!
//! ```bash
//! # Wi-Fi credentials are compiled in
//! WIFI_SSID=MyNet WIFI_PASSWORD=secret \
//!     cargo build --features esp32-mqtt --target xtensa-esp32-espidf
//! ```
//!
//! Broker address, pins, client id, and topic come from compiled-in
//! defaults overlaid with the JSON record in NVS (namespace `doorbell`,
//! key `config`).

use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::log::EspLogger;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};
use rs_doorbell::hal::esp32::{
    station_mac, Esp32Button, Esp32Delay, Esp32Led, Esp32Mqtt, Esp32Wifi, NvsConfigStore,
};
use rs_doorbell::{derived_client_id, Config, DebouncedInput, Doorbell, Indicator, WifiConfig};

fn main() -> anyhow::Result<()> {
    esp_idf_hal::sys::link_patches();
    EspLogger::initialize_default();

    info!("doorbell notifier starting");

    // =========================================================================
    // Configuration: defaults (client id derived from the MAC, Wi-Fi
    // from the build environment) overlaid with the NVS record
    // =========================================================================
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let mut store = NvsConfigStore::new(nvs_partition.clone())?;

    let defaults = Config::default()
        .with_client_id(derived_client_id(&station_mac()).as_str())
        .with_wifi(
            WifiConfig::default()
                .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
                .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
        );
    let config = Config::load(&mut store, defaults);
    info!(
        "broker {}:{}, topic {}",
        config.broker, config.broker_port, config.wire_topic()
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Indicator LEDs
    // =========================================================================
    let indicator = match config.led_pin_2 {
        Some(second) => Indicator::pair(Esp32Led::new(config.led_pin_1)?, Esp32Led::new(second)?),
        None => Indicator::single(Esp32Led::new(config.led_pin_1)?),
    };
    info!(
        "indicator ready (GPIO{}{})",
        config.led_pin_1,
        config
            .led_pin_2
            .map(|p| format!(", GPIO{p}"))
            .unwrap_or_default()
    );

    // =========================================================================
    // Button (ISR registered once, here)
    // =========================================================================
    let mut input = DebouncedInput::new(Esp32Button::new(config.button_pin)?);
    info!("button ready (GPIO{})", config.button_pin);

    // =========================================================================
    // Wi-Fi
    // =========================================================================
    let sysloop = EspSystemEventLoop::take()?;
    let _wifi = if config.wifi.is_configured() {
        Some(Esp32Wifi::new(
            peripherals.modem,
            sysloop,
            Some(nvs_partition),
            &config.wifi,
        )?)
    } else {
        warn!("wifi not configured (set WIFI_SSID/WIFI_PASSWORD)");
        None
    };

    // =========================================================================
    // Broker connection and press service loop
    // =========================================================================
    let mqtt = Esp32Mqtt::new(&config);
    let mut bell = Doorbell::new(mqtt, indicator, Esp32Delay::new(), &config);
    bell.connect();

    let mut delay = Esp32Delay::new();
    info!("ready, waiting for presses");
    loop {
        input.line_mut().await_falling_edge()?;
        if input.confirm_press(&mut delay) {
            bell.handle_press();
        }
    }
}
