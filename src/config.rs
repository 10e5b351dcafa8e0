//! Capture-layer configuration.
//!
//! Deserialized from a TOML file shipped next to the host process. All
//! sections and fields are optional; absent values fall back to the
//! defaults below, so an empty file is a valid configuration.

use std::fs;
use std::path::Path;

use log::Level;
use serde::Deserialize;

use crate::capture_log;
use crate::error::CaptureError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub logging: LoggingConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write log lines to a file next to the host process.
    pub enable: bool,
    /// ERROR / WARN / INFO / DEBUG / TRACE; anything else means INFO.
    pub level: String,
    /// File name used when `enable` is set.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable: false,
            level: "INFO".into(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Capacity of the bounded side-channel queue.
    pub channel_capacity: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 512,
        }
    }
}

/// Load and parse the capture configuration from `path`.
pub fn load_config(path: &Path) -> Result<CaptureConfig, CaptureError> {
    capture_log!(Level::Debug, "config", "reading config from {:?}", path);
    let txt = fs::read_to_string(path)?;
    let cfg: CaptureConfig = toml::from_str(&txt)?;
    capture_log!(Level::Info, "config", "loaded config from {:?}", path);
    Ok(cfg)
}
