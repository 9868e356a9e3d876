//! NVS-backed configuration store.
//!
//! The persisted configuration record lives as one JSON string in the
//! default NVS partition, namespace `doorbell`, key `config` — the
//! device's fixed well-known location. Editing it (e.g. over a flashing
//! tool or a future provisioning path) survives reboots and firmware
//! updates.

use crate::traits::ConfigStore;
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::EspError;

const NVS_NAMESPACE: &str = "doorbell";
const NVS_CONFIG_KEY: &str = "config";

/// Upper bound on the stored record; the real record is well under 1 KiB.
const MAX_RECORD_LEN: usize = 1024;

/// Configuration store over the default NVS partition.
pub struct NvsConfigStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsConfigStore {
    /// Open (creating if needed) the doorbell namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be opened read-write.
    pub fn new(partition: EspDefaultNvsPartition) -> anyhow::Result<Self> {
        let nvs = EspNvs::new(partition, NVS_NAMESPACE, true)?;
        Ok(Self { nvs })
    }
}

impl ConfigStore for NvsConfigStore {
    type Error = EspError;

    fn read(&mut self) -> Result<Option<String>, Self::Error> {
        let mut buffer = vec![0_u8; MAX_RECORD_LEN];
        let record = self.nvs.get_str(NVS_CONFIG_KEY, &mut buffer)?;
        Ok(record.map(str::to_owned))
    }

    fn write(&mut self, contents: &str) -> Result<(), Self::Error> {
        self.nvs.set_str(NVS_CONFIG_KEY, contents)
    }
}
