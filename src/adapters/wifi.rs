//! WiFi station-mode bring-up.
//!
//! Credential validation runs on every target; the actual connection uses
//! the blocking ESP-IDF WiFi driver and retries a bounded number of times
//! before giving up. There is no background reconnect here; a greenhouse
//! that loses WiFi keeps controlling fan/pump/light regardless, and the
//! publication task handles its own broker failure.

use core::fmt;

#[cfg(target_os = "espidf")]
use log::{info, warn};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        // Open network.
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Credentials
// ───────────────────────────────────────────────────────────────

/// Validated station credentials.
#[derive(Debug)]
pub struct WifiCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

impl WifiCredentials {
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        Ok(Self {
            ssid: ssid.try_into().map_err(|()| ConnectivityError::InvalidSsid)?,
            password: password
                .try_into()
                .map_err(|()| ConnectivityError::InvalidPassword)?,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ───────────────────────────────────────────────────────────────
// Station connect (ESP-IDF)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const CONNECT_ATTEMPTS: u32 = 5;
#[cfg(target_os = "espidf")]
const RETRY_DELAY_MS: u64 = 3_000;

/// Configure station mode and connect, retrying a few times.
#[cfg(target_os = "espidf")]
pub fn connect_station(
    wifi: &mut esp_idf_svc::wifi::BlockingWifi<&mut esp_idf_svc::wifi::EspWifi<'static>>,
    credentials: &WifiCredentials,
) -> Result<(), ConnectivityError> {
    use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

    let auth_method = if credentials.password().is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPAWPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: credentials
            .ssid()
            .try_into()
            .map_err(|()| ConnectivityError::InvalidSsid)?,
        password: credentials
            .password()
            .try_into()
            .map_err(|()| ConnectivityError::InvalidPassword)?,
        auth_method,
        ..Default::default()
    }))
    .map_err(|_| ConnectivityError::ConnectionFailed)?;

    wifi.start().map_err(|_| ConnectivityError::ConnectionFailed)?;
    info!("wifi started, connecting to '{}'", credentials.ssid());

    for attempt in 1..=CONNECT_ATTEMPTS {
        match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
            Ok(()) => {
                info!("wifi connected on attempt {}", attempt);
                return Ok(());
            }
            Err(e) => {
                warn!(
                    "wifi connect attempt {}/{} failed: {}",
                    attempt, CONNECT_ATTEMPTS, e
                );
                let _ = wifi.disconnect();
                if attempt < CONNECT_ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS));
                }
            }
        }
    }

    Err(ConnectivityError::ConnectionFailed)
}
