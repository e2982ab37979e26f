//! Configuration loading and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::fetch::{FetcherConfig, SeasonQuery};

/// Environment variable that overrides `source.api_key`.
pub const API_KEY_ENV: &str = "CFBD_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Game data provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Season to load
    #[serde(default = "default_year")]
    pub year: i32,

    /// "regular", "postseason", ... (all when unset)
    #[serde(default)]
    pub season_type: Option<String>,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Where raw responses are cached
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Largest response accepted, in bytes
    #[serde(default = "default_max_content_size")]
    pub max_content_size: usize,
}

fn default_base_url() -> String {
    "https://api.collegefootballdata.com".to_string()
}

fn default_year() -> i32 {
    2024
}

fn default_timeout() -> u64 {
    30
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_max_content_size() -> usize {
    50 * 1024 * 1024
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            year: default_year(),
            season_type: None,
            timeout_seconds: default_timeout(),
            cache_dir: default_cache_dir(),
            cache_ttl_seconds: default_cache_ttl(),
            max_content_size: default_max_content_size(),
        }
    }
}

impl SourceConfig {
    /// Season selected by this configuration.
    pub fn season_query(&self) -> SeasonQuery {
        SeasonQuery {
            year: self.year,
            season_type: self.season_type.clone(),
        }
    }

    /// Build fetcher settings. `refresh` bypasses the response cache.
    pub fn fetcher_config(&self, refresh: bool) -> FetcherConfig {
        FetcherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            cache_dir: self.cache_dir.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl_seconds),
            refresh,
            max_content_size: self.max_content_size,
            timeout: Duration::from_secs(self.timeout_seconds),
            ..Default::default()
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults. The API key
    /// environment variable is applied on top either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.apply_api_key(key);
        }

        Ok(config)
    }

    /// Override the configured API key. Blank keys are ignored.
    pub fn apply_api_key(&mut self, key: String) {
        let key = key.trim();
        if !key.is_empty() {
            self.source.api_key = Some(key.to_string());
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }

        if !(1869..=2100).contains(&self.source.year) {
            return Err(ConfigError::ValidationError(format!(
                "Season year {} is out of range",
                self.source.year
            )));
        }

        if Url::parse(&self.source.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Source base_url is not a valid URL: {}",
                self.source.base_url
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
