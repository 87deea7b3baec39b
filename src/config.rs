//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analytics::{ViewLimits, DEFAULT_VIEW_LIMIT};
use crate::storage::DEFAULT_MAX_EVENTS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event log location and retention
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,

    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_file_name() -> String {
    "search-analytics.json".to_string()
}

fn default_max_events() -> usize {
    DEFAULT_MAX_EVENTS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
            max_events: default_max_events(),
        }
    }
}

impl StorageConfig {
    /// Full path of the persisted event log
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}

/// Lengths of the aggregate views
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_view_limit")]
    pub popular_limit: usize,

    #[serde(default = "default_view_limit")]
    pub recent_limit: usize,
}

fn default_view_limit() -> usize {
    DEFAULT_VIEW_LIMIT
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            popular_limit: default_view_limit(),
            recent_limit: default_view_limit(),
        }
    }
}

impl AnalyticsConfig {
    pub fn view_limits(&self) -> ViewLimits {
        ViewLimits {
            popular: self.popular_limit,
            recent: self.recent_limit,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_size() -> usize {
    64 * 1024 // 64 KB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
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
            dirs::config_dir().map(|p| p.join("search-analytics").join("config.toml")),
            Some(PathBuf::from("/etc/search-analytics/config.toml")),
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

    /// Reject settings the store cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.max_events == 0 {
            return Err(ConfigError::Invalid(
                "storage.max_events must be at least 1".to_string(),
            ));
        }
        if self.storage.file_name.is_empty() {
            return Err(ConfigError::Invalid(
                "storage.file_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("SEARCH_ANALYTICS_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(max) = std::env::var("SEARCH_ANALYTICS_MAX_EVENTS") {
            match max.parse::<usize>() {
                Ok(n) if n > 0 => self.storage.max_events = n,
                _ => tracing::warn!("Ignoring invalid SEARCH_ANALYTICS_MAX_EVENTS={}", max),
            }
        }

        if let Ok(host) = std::env::var("SEARCH_ANALYTICS_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SEARCH_ANALYTICS_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(level) = std::env::var("SEARCH_ANALYTICS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SEARCH_ANALYTICS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Search Analytics Configuration
#
# Environment variables override these settings:
# - SEARCH_ANALYTICS_DATA_DIR
# - SEARCH_ANALYTICS_MAX_EVENTS
# - SEARCH_ANALYTICS_HOST
# - SEARCH_ANALYTICS_PORT
# - SEARCH_ANALYTICS_LOG_LEVEL
# - SEARCH_ANALYTICS_LOG_FORMAT

[storage]
# Directory holding the event log
data_dir = "./data"

# Event log file name inside data_dir
file_name = "search-analytics.json"

# Oldest events are dropped beyond this many
max_events = 1000

[analytics]
# Entries in the popular searches view
popular_limit = 10

# Entries in the recent searches view
recent_limit = 10

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8000

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Maximum request body size in bytes
max_body_size = 65536

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
