use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::grouping::{DEFAULT_THRESHOLD_MS, Locale, default_threshold};

pub const DEFAULT_CONFIG_PATH: &str = "config/chatterbox.json";
pub const API_URL_ENV: &str = "CHATTERBOX_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base of the REST API, e.g. `http://localhost:8080/api`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Maximum gap between two messages of the same burst.
    pub timestamp_threshold_ms: i64,
    pub locale: Locale,
    /// SQLite file holding the persisted session.
    pub session_db: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 10,
            timestamp_threshold_ms: DEFAULT_THRESHOLD_MS,
            locale: Locale::default(),
            session_db: "data/session.db".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn timestamp_threshold(&self) -> TimeDelta {
        if self.timestamp_threshold_ms <= 0 {
            log::warn!(
                "Ignoring non-positive timestamp_threshold_ms ({}); using default",
                self.timestamp_threshold_ms
            );
            return default_threshold();
        }
        TimeDelta::milliseconds(self.timestamp_threshold_ms)
    }

    /// Apply `CHATTERBOX_API_URL` (if set) and then the CLI override.
    pub fn with_overrides(mut self, env_api_url: Option<String>, cli_api_url: Option<String>) -> Self {
        if let Some(url) = env_api_url.filter(|url| !url.trim().is_empty()) {
            log::info!("Using API URL from {API_URL_ENV}: {url}");
            self.api_base_url = url;
        }
        if let Some(url) = cli_api_url {
            self.api_base_url = url;
        }
        self
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    crate::storage::ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}
