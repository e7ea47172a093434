use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::DeviceError;
use crate::net::DeviceClient;
use crate::simulate;
use crate::types::{
    BatteryReply, ConfigureReply, HealthStatus, HistoryReply, ScanReply, Source, WifiCredentials,
};

pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Forwards each inbound operation to the device once and picks the reply.
///
/// A device failure never escapes as an error: every operation maps the
/// `Err` branch to its own fallback reply.
#[derive(Debug, Clone)]
pub struct Gateway {
    device: DeviceClient,
    device_ip: String,
}

impl Gateway {
    pub fn new(config: &Config) -> Result<Self, DeviceError> {
        let device = DeviceClient::new(&config.device_url)?;
        Ok(Self::with_client(config, device))
    }

    pub fn with_client(config: &Config, device: DeviceClient) -> Self {
        Gateway {
            device,
            device_ip: config.device_ip.clone(),
        }
    }

    pub fn device_url(&self) -> &str {
        self.device.base_url()
    }

    pub async fn configure_device(&self, creds: WifiCredentials) -> ConfigureReply {
        match self.device.configure_wifi(&creds).await {
            Ok(response) => {
                debug!(ssid = %creds.ssid, device_name = %creds.device_name, "wifi configuration accepted");
                ConfigureReply::applied(response)
            }
            Err(e) => {
                warn!(error = %e, ssid = %creds.ssid, "wifi configuration failed");
                ConfigureReply::failed(e.to_string())
            }
        }
    }

    pub async fn scan_networks(&self) -> ScanReply {
        match self.device.scan_networks().await {
            Ok(networks) => ScanReply::Networks(networks),
            Err(e) => {
                warn!(error = %e, "wifi scan failed");
                ScanReply::Unavailable {
                    networks: Vec::new(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn battery_data(&self) -> BatteryReply {
        match self.device.fetch_battery().await {
            Ok(payload) => BatteryReply::Live(tag_source(payload)),
            Err(e) => {
                warn!(error = %e, "battery read failed, serving mock sample");
                BatteryReply::Mock {
                    data: simulate::mock_battery_sample(),
                    source: Source::Mock,
                    error: e.to_string(),
                }
            }
        }
    }

    /// `limit` is forwarded untouched; the device decides what it accepts.
    pub async fn battery_history(&self, limit: Option<String>) -> HistoryReply {
        let limit = limit.unwrap_or_else(|| DEFAULT_HISTORY_LIMIT.to_string());
        match self.device.fetch_history(&limit).await {
            Ok(payload) => HistoryReply::Live(tag_source(payload)),
            Err(e) => {
                warn!(error = %e, %limit, "battery history read failed");
                HistoryReply::mock(e.to_string())
            }
        }
    }

    /// Liveness of the relay itself; the device is not contacted.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            esp32_ip: self.device_ip.clone(),
            last_update: Utc::now(),
        }
    }
}

// Device fields pass through untouched; only a missing `source` is filled in.
fn tag_source(mut payload: Value) -> Value {
    if let Value::Object(map) = &mut payload {
        map.entry("source")
            .or_insert_with(|| Value::from(Source::Esp32.as_str()));
    }
    payload
}
