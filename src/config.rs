use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_DEVICE_IP: &str = "192.168.4.1";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host of the ESP32, reported by the health check.
    pub device_ip: String,
    /// Base URL every outbound call is made against.
    pub device_url: String,
    pub listen_addr: SocketAddr,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Uses the JSON file named by `GATEWAY_CONFIG` when set, the environment otherwise.
    pub fn load() -> Result<Self> {
        match env::var("GATEWAY_CONFIG") {
            Ok(path) => Self::load_from_file(&path),
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = var("ESP32_BASE_URL");
        let device_ip = match (var("ESP32_IP"), &base_url) {
            (Some(ip), _) => ip,
            (None, Some(url)) => host_of(url)?,
            (None, None) => DEFAULT_DEVICE_IP.to_string(),
        };
        let device_url = match base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}", device_ip),
        };

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("invalid LISTEN_ADDR {:?}", listen_addr))?;

        let log_format = match var("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Config {
            device_ip,
            device_url,
            listen_addr,
            log_format,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.device_url = config.device_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

// The health check reports the host the relay actually talks to.
fn host_of(url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url)
        .with_context(|| format!("invalid ESP32_BASE_URL {:?}", url))?;
    parsed
        .host_str()
        .map(str::to_string)
        .with_context(|| format!("ESP32_BASE_URL {:?} has no host", url))
}
