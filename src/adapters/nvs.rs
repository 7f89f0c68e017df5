//! NVS-backed configuration store.
//!
//! Implements [`ConfigPort`]: a JSON-serialized [`GreenhouseConfig`] is
//! read from the default NVS partition at boot. There is no save path;
//! provisioning writes the blob out of band (idf.py nvs-flash or a future
//! provisioning flow) and the firmware only ever reads it.
//!
//! On non-espidf targets `load` reports not-found so callers fall back to
//! defaults, mirroring a first boot.

use crate::app::ports::ConfigPort;
use crate::config::GreenhouseConfig;
use crate::error::ConfigError;

#[cfg(target_os = "espidf")]
const NVS_NAMESPACE: &str = "greenhaus";
#[cfg(target_os = "espidf")]
const NVS_CONFIG_KEY: &str = "config_json";
#[cfg(target_os = "espidf")]
const MAX_CONFIG_BYTES: usize = 2048;

pub struct NvsConfigStore {
    #[cfg(target_os = "espidf")]
    partition: esp_idf_svc::nvs::EspDefaultNvsPartition,
}

#[cfg(target_os = "espidf")]
impl NvsConfigStore {
    pub fn new(partition: esp_idf_svc::nvs::EspDefaultNvsPartition) -> Self {
        Self { partition }
    }
}

#[cfg(not(target_os = "espidf"))]
impl NvsConfigStore {
    pub fn new() -> Self {
        Self {}
    }
}

impl ConfigPort for NvsConfigStore {
    #[cfg(target_os = "espidf")]
    fn load(&self) -> Result<GreenhouseConfig, ConfigError> {
        let nvs = esp_idf_svc::nvs::EspNvs::new(self.partition.clone(), NVS_NAMESPACE, false)
            .map_err(|_| ConfigError::IoError)?;

        let mut buf = [0u8; MAX_CONFIG_BYTES];
        match nvs.get_str(NVS_CONFIG_KEY, &mut buf) {
            Ok(Some(json)) => serde_json::from_str(json).map_err(|_| ConfigError::Corrupted),
            Ok(None) => Err(ConfigError::NotFound),
            Err(_) => Err(ConfigError::IoError),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn load(&self) -> Result<GreenhouseConfig, ConfigError> {
        Err(ConfigError::NotFound)
    }
}
