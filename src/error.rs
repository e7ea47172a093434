use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong talking to the ESP32.
///
/// The `Display` text is what callers see in the `error` field of a fallback reply.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("could not reach device at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("device returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl DeviceError {
    pub(crate) fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeviceError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if let Some(status) = err.status() {
            DeviceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            DeviceError::Unreachable {
                url: url.to_string(),
                source: err,
            }
        }
    }
}
