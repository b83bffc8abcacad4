//! Runtime configuration.
//!
//! Defaults, then the JSON file, then environment variables, then CLI
//! flags; each layer overrides the previous one.
//!
//! ```ignore
//! use packdeck::config::DeckConfig;
//!
//! let config = DeckConfig::default()
//!     .with_backend_url("http://127.0.0.1:9000")
//!     .with_page_size(40);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{classify_io_error, ConfigError, SystemError};
use crate::events::TransportConfig;

pub const ENV_BACKEND_URL: &str = "PACKDECK_BACKEND_URL";
pub const ENV_EVENTS_URL: &str = "PACKDECK_EVENTS_URL";
pub const ENV_DEV: &str = "PACKDECK_DEV";

const DEV_BACKEND_URL: &str = "http://localhost:4717";
const DEV_EVENTS_URL: &str = "ws://localhost:4717/events";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Base URL of the command gateway.
    pub backend_url: String,
    /// WebSocket URL of the event stream.
    pub events_url: String,
    /// Reconnect attempts before the event channel gives up.
    pub max_retries: u8,
    pub max_backoff_secs: u64,
    /// UI tick interval.
    pub tick_ms: u64,
    /// Catalog results per page.
    pub page_size: u32,
    /// Quiet period before a typed search is sent.
    pub search_debounce_ms: u64,
    /// Performance snapshots kept per instance.
    pub snapshot_retention: usize,
    pub toast_ttl_secs: u64,
    /// Verbose logging and localhost endpoints.
    pub dev_mode: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:4717".to_string(),
            events_url: "ws://127.0.0.1:4717/events".to_string(),
            max_retries: 5,
            max_backoff_secs: 30,
            tick_ms: 100,
            page_size: 20,
            search_debounce_ms: 300,
            snapshot_retention: 500,
            toast_ttl_secs: 4,
            dev_mode: false,
        }
    }
}

impl DeckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_events_url(mut self, url: impl Into<String>) -> Self {
        self.events_url = url.into();
        self
    }

    pub fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_max_backoff_secs(mut self, secs: u64) -> Self {
        self.max_backoff_secs = secs;
        self
    }

    pub fn with_tick_ms(mut self, ms: u64) -> Self {
        self.tick_ms = ms;
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_search_debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = ms;
        self
    }

    pub fn with_snapshot_retention(mut self, retention: usize) -> Self {
        self.snapshot_retention = retention;
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// `<config dir>/packdeck/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("packdeck").join("config.json"))
    }

    /// `<data dir>/packdeck`, home of the log file.
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("packdeck"))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })
            }
        };
        let config: Self = serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| classify_io_error(e, Some(parent.to_path_buf()), "create config directory"))?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|e| SystemError::IoError {
            operation: "serialize config".to_string(),
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        fs::write(path, text).map_err(|e| classify_io_error(e, Some(path.to_path_buf()), "write config"))
    }

    /// Apply `PACKDECK_*` environment overrides.
    pub fn from_env(mut self) -> Self {
        self.apply_env(|key| std::env::var(key).ok());
        self
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if var(ENV_DEV).is_some_and(|v| v != "0" && !v.is_empty()) {
            self.dev_mode = true;
            self.backend_url = DEV_BACKEND_URL.to_string();
            self.events_url = DEV_EVENTS_URL.to_string();
        }
        if let Some(url) = var(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.backend_url = url;
        }
        if let Some(url) = var(ENV_EVENTS_URL).filter(|v| !v.is_empty()) {
            self.events_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let http = |u: &str| u.starts_with("http://") || u.starts_with("https://");
        let ws = |u: &str| u.starts_with("ws://") || u.starts_with("wss://");
        if !http(&self.backend_url) {
            return Err(ConfigError::InvalidUrl {
                field: "backend_url",
                value: self.backend_url.clone(),
            });
        }
        if !ws(&self.events_url) {
            return Err(ConfigError::InvalidUrl {
                field: "events_url",
                value: self.events_url.clone(),
            });
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                message: format!("{} is outside 1..=100", self.page_size),
            });
        }
        if self.snapshot_retention == 0 {
            return Err(ConfigError::InvalidValue {
                field: "snapshot_retention",
                message: "must be at least 1".to_string(),
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_ms",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl_secs)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            url: self.events_url.clone(),
            max_retries: self.max_retries,
            max_backoff_secs: self.max_backoff_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(DeckConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DeckConfig::new()
            .with_backend_url("https://deck.local")
            .with_page_size(50)
            .with_search_debounce_ms(10);
        assert_eq!(config.backend_url, "https://deck.local");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_debounce(), Duration::from_millis(10));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DeckConfig::default();
        config.apply_env(env(&[(ENV_BACKEND_URL, "http://10.0.0.2:9000")]));
        assert_eq!(config.backend_url, "http://10.0.0.2:9000");
        assert!(!config.dev_mode);

        let mut config = DeckConfig::default();
        config.apply_env(env(&[(ENV_DEV, "1"), (ENV_EVENTS_URL, "ws://x/events")]));
        assert!(config.dev_mode);
        assert_eq!(config.backend_url, DEV_BACKEND_URL);
        assert_eq!(config.events_url, "ws://x/events");
    }

    #[test]
    fn test_dev_zero_is_off() {
        let mut config = DeckConfig::default();
        config.apply_env(env(&[(ENV_DEV, "0")]));
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            DeckConfig::default().with_backend_url("ftp://x").validate(),
            Err(ConfigError::InvalidUrl { field: "backend_url", .. })
        ));
        assert!(matches!(
            DeckConfig::default().with_events_url("http://x").validate(),
            Err(ConfigError::InvalidUrl { field: "events_url", .. })
        ));
        assert!(DeckConfig::default().with_page_size(0).validate().is_err());
        assert!(DeckConfig::default().with_snapshot_retention(0).validate().is_err());
    }

    #[test]
    fn test_transport_config() {
        let transport = DeckConfig::default().with_max_retries(2).transport();
        assert_eq!(transport.max_retries, 2);
        assert_eq!(transport.url, "ws://127.0.0.1:4717/events");
    }
}
