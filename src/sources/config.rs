//! Configuration for the remote collection source.
//!
//! Configuration is stored in TOML format at `~/.config/gsel/config.toml`
//! (or XDG equivalent). Every key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! base_url = "https://api.artic.edu/api/v1"
//! page_size = 12
//! http_timeout_secs = 10
//!
//! # Serve pages from a local JSON array instead of the network.
//! # fixture = "/home/me/records.json"
//! ```
//!
//! `GSEL_BASE_URL`, `GSEL_PAGE_SIZE` and `GSEL_FIXTURE` override the file;
//! command-line flags override both.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when loading source configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Where pages come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// API root; pages are requested from `{base_url}/artworks`.
    pub base_url: String,

    /// Records per page (1..=100).
    pub page_size: u32,

    /// Per-request timeout for the HTTP source.
    pub http_timeout_secs: u64,

    /// Optional JSON fixture used instead of the HTTP source.
    pub fixture: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            fixture: None,
        }
    }
}

impl SourceConfig {
    /// Load configuration from the default location.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path.
    ///
    /// - Primary: `$XDG_CONFIG_HOME/gsel/config.toml`
    /// - Fallback: platform-specific config dir
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(xdg_config) = dotenvy::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join("gsel").join("config.toml"));
        }

        dirs::config_dir()
            .map(|p| p.join("gsel").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Overlay `GSEL_*` environment variables onto this config.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = dotenvy::var("GSEL_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(raw) = dotenvy::var("GSEL_PAGE_SIZE") {
            self.page_size = raw.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("GSEL_PAGE_SIZE is not a number: {raw}"))
            })?;
        }
        if let Ok(path) = dotenvy::var("GSEL_FIXTURE") {
            self.fixture = Some(PathBuf::from(path));
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("base_url cannot be empty".into()));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
