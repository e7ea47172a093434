use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::DeviceError;
use crate::types::WifiCredentials;

/// Every outbound call to the device gives up after this long.
pub const DEVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Thin wrapper over the ESP32's HTTP endpoints. One try per call, no retries.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DeviceClient {
    pub fn new(base_url: &str) -> Result<Self, DeviceError> {
        Self::with_timeout(base_url, DEVICE_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, DeviceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeviceError::Client)?;
        Ok(DeviceClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn configure_wifi(&self, creds: &WifiCredentials) -> Result<Value, DeviceError> {
        let url = format!("{}/wifi/configure", self.base_url);
        self.send(&url, self.client.post(&url).json(creds)).await
    }

    pub async fn scan_networks(&self) -> Result<Value, DeviceError> {
        let url = format!("{}/wifi/scan", self.base_url);
        self.send(&url, self.client.get(&url)).await
    }

    pub async fn fetch_battery(&self) -> Result<Value, DeviceError> {
        let url = format!("{}/api/battery", self.base_url);
        self.send(&url, self.client.get(&url)).await
    }

    pub async fn fetch_history(&self, limit: &str) -> Result<Value, DeviceError> {
        let url = format!("{}/api/history", self.base_url);
        self.send(&url, self.client.get(&url).query(&[("limit", limit)]))
            .await
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Value, DeviceError> {
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DeviceError::from_reqwest(url, self.timeout, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DeviceError::from_reqwest(url, self.timeout, e))?;
        let value = serde_json::from_slice(&body).map_err(|source| DeviceError::Decode {
            url: url.to_string(),
            source,
        })?;

        debug!(url, bytes = body.len(), "device responded");
        Ok(value)
    }
}
