use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::http_client::{HttpClientConfig, DEFAULT_USER_AGENT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    /// Register the offline mock source next to the real ones
    #[serde(default)]
    pub use_mock: bool,

    /// Timeout for a single HTTP call in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between two chapter feed pages in milliseconds
    #[serde(default = "default_feed_page_delay")]
    pub feed_page_delay_ms: u64,

    /// Upper bound for a whole serie detail fetch in seconds
    #[serde(default = "default_detail_deadline")]
    pub detail_deadline_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// log4rs configuration file, used when present
    #[serde(default = "default_log_config_file")]
    pub config_file: String,
}

fn default_timeout() -> u64 { 5 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_feed_page_delay() -> u64 { 500 }
fn default_detail_deadline() -> u64 { 60 }
fn default_level() -> String { "info".to_string() }
fn default_log_config_file() -> String { "log4rs.yml".to_string() }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            use_mock: false,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            feed_page_delay_ms: default_feed_page_delay(),
            detail_deadline_secs: default_detail_deadline(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            config_file: default_log_config_file(),
        }
    }
}

impl Config {
    /// Loads `path`, falling back to defaults when the file is missing or
    /// invalid.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Invalid config file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn feed_page_delay(&self) -> Duration {
        Duration::from_millis(self.feed_page_delay_ms)
    }

    pub fn detail_deadline(&self) -> Duration {
        Duration::from_secs(self.detail_deadline_secs)
    }

    /// HTTP client settings derived from this configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
            ..HttpClientConfig::default()
        }
    }
}
