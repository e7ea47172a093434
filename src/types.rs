use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DEVICE_NAME: &str = "ESP32-Battery";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatterySample {
    pub voltage: f64,
    pub current: f64,
    pub temperature: f64,
    pub soc: u8,
    pub soh: u8,
    pub fault_flags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Where a battery payload came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Esp32,
    Mock,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Esp32 => "esp32",
            Source::Mock => "mock",
        }
    }
}

// Forwarded as-is to POST /wifi/configure; nothing here is validated.
// Missing fields go out as `null`, any JSON type is accepted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WifiCredentials {
    #[serde(default)]
    pub ssid: Value,
    #[serde(default)]
    pub password: Value,
    #[serde(default = "default_device_name")]
    pub device_name: Value,
}

fn default_device_name() -> Value {
    Value::from(DEFAULT_DEVICE_NAME)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub esp32_ip: String,
    pub last_update: DateTime<Utc>,
}

/// `limit` is passed to the device verbatim.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum ConfigureReply {
    Applied { success: bool, response: Value },
    Failed { success: bool, error: String },
}

impl ConfigureReply {
    pub fn applied(response: Value) -> Self {
        ConfigureReply::Applied {
            success: true,
            response,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ConfigureReply::Failed {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum ScanReply {
    Networks(Value),
    Unavailable { networks: Vec<Value>, error: String },
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum BatteryReply {
    Live(Value),
    Mock {
        data: BatterySample,
        source: Source,
        error: String,
    },
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum HistoryReply {
    Live(Value),
    Mock {
        data: Vec<BatterySample>,
        source: Source,
        error: String,
    },
}

impl HistoryReply {
    pub fn mock(error: impl Into<String>) -> Self {
        HistoryReply::Mock {
            data: Vec::new(),
            source: Source::Mock,
            error: error.into(),
        }
    }
}
