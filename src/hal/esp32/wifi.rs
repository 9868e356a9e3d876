//! Wi-Fi station bring-up for the doorbell.
//!
//! Synchronous station-mode connection using esp-idf-svc. The
//! connection is established during construction and held for the
//! lifetime of this struct; the broker connect loop upstream handles
//! the case where it never comes up.

use crate::config::WifiConfig;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

/// Station-mode Wi-Fi connection.
pub struct Esp32Wifi<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> Esp32Wifi<'a> {
    /// Connect to the configured access point and wait for DHCP.
    ///
    /// # Errors
    ///
    /// Returns an error if driver initialization, association, or DHCP
    /// fails.
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &WifiConfig,
    ) -> anyhow::Result<Self> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

        // esp-idf wants its own bounded string types
        let mut ssid: heapless::String<32> = heapless::String::new();
        let _ = ssid.push_str(config.ssid.as_str());
        let mut password: heapless::String<64> = heapless::String::new();
        let _ = password.push_str(config.password.as_str());

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid,
            password,
            ..Default::default()
        }))?;

        wifi.start()?;
        info!("wifi connecting to '{}'", config.ssid);
        wifi.connect()?;
        wifi.wait_netif_up()?;

        if let Ok(ip_info) = wifi.wifi().sta_netif().get_ip_info() {
            info!("wifi connected, ip {}", ip_info.ip);
        }

        Ok(Self { wifi })
    }

    /// Check if the station is associated.
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }
}
