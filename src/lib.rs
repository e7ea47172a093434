//! HTTP relay in front of an ESP32 battery monitor.
//!
//! Each API call is forwarded once to the device. When the device can't be
//! reached the caller gets a fixed fallback instead of a bare error.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod net;
pub mod simulate;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use error::DeviceError;
pub use gateway::Gateway;
