//! Configuration System
//!
//! Handles loading client configuration from TOML files and environment
//! variables. In the browser the UI builds the same structure from
//! `window.API_BASE_URL` instead.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiBase;
use crate::format::CurrencyFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Absolute (`http://host/api`) or relative (`/api`) base address
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ApiSettings {
    /// Resolved base address (`/api` when unset)
    pub fn base(&self) -> ApiBase {
        ApiBase::from_setting(self.base_url.as_deref())
    }
}

/// Snapshot cache settings for native hosts
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

#[cfg(not(target_arch = "wasm32"))]
fn default_cache_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("expense-tracker").to_string_lossy().to_string())
        .unwrap_or_else(|| "./expense_tracker_cache".to_string())
}

#[cfg(target_arch = "wasm32")]
fn default_cache_dir() -> String {
    "./expense_tracker_cache".to_string()
}

impl CacheConfig {
    /// The cache directory with a leading `~` expanded to the home directory
    pub fn path(&self) -> PathBuf {
        expand_home(&self.dir)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn expand_home(dir: &str) -> PathBuf {
    let rest = match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(dir),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(dir),
    }
}

#[cfg(target_arch = "wasm32")]
fn expand_home(dir: &str) -> PathBuf {
    PathBuf::from(dir)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

/// Amount display settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_indian_grouping")]
    pub indian_grouping: bool,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_indian_grouping() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            indian_grouping: default_indian_grouping(),
        }
    }
}

impl DisplayConfig {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency_symbol.clone(),
            indian_grouping: self.indian_grouping,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            config_dir().map(|p| p.join("expense-tracker").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides; the prefixed variable wins over the bare one
        if let Some(url) = lookup("EXPENSE_TRACKER_API_BASE_URL").or_else(|| lookup("API_BASE_URL")) {
            self.api.base_url = Some(url);
        }
        if let Some(timeout) = lookup("EXPENSE_TRACKER_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.api.request_timeout_ms = ms;
            }
        }

        // Cache overrides
        if let Some(dir) = lookup("EXPENSE_TRACKER_CACHE_DIR") {
            self.cache.dir = dir;
        }

        // Logging overrides
        if let Some(level) = lookup("EXPENSE_TRACKER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("EXPENSE_TRACKER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir()
}

#[cfg(target_arch = "wasm32")]
fn config_dir() -> Option<PathBuf> {
    None
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Expense Tracker Configuration
#
# Environment variables override these settings:
# - API_BASE_URL / EXPENSE_TRACKER_API_BASE_URL
# - EXPENSE_TRACKER_TIMEOUT_MS
# - EXPENSE_TRACKER_CACHE_DIR
# - EXPENSE_TRACKER_LOG_LEVEL
# - EXPENSE_TRACKER_LOG_FORMAT

[api]
# Backend base address: absolute ("http://localhost:5000/api") or relative ("/api")
base_url = "/api"

# Give up on a request after this many milliseconds
request_timeout_ms = 10000

[cache]
# Directory holding the last-known-good snapshots; a leading ~ is expanded.
# Defaults to the platform data directory.
# dir = "~/.local/share/expense-tracker"

[display]
currency_symbol = "₹"
indian_grouping = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
