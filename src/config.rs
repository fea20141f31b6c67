//! Configuration System
//!
//! Handles loading configuration from TOML and environment variables.
//! The browser build embeds its TOML; native tooling and tests read files.

use alloy_primitives::Address;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chain::{AdapterConfig, DEFAULT_CONTRACT_ADDRESS};
use crate::session::ChainChangePolicy;
use crate::views::CachePolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contract: ContractConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Deployed poll contract
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    #[serde(default = "default_contract_address")]
    pub address: String,

    #[serde(default = "default_receipt_poll_interval")]
    pub receipt_poll_interval_ms: u64,
}

fn default_contract_address() -> String {
    DEFAULT_CONTRACT_ADDRESS.to_string()
}

fn default_receipt_poll_interval() -> u64 {
    1000
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: default_contract_address(),
            receipt_poll_interval_ms: default_receipt_poll_interval(),
        }
    }
}

/// Wallet session behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Reconnect on startup when the wallet already authorized the site
    #[serde(default = "default_auto_connect")]
    pub auto_connect: bool,

    #[serde(default)]
    pub chain_change: ChainChangePolicy,
}

fn default_auto_connect() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_connect: default_auto_connect(),
            chain_change: ChainChangePolicy::default(),
        }
    }
}

/// Query cache freshness
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_list_stale")]
    pub list_stale_secs: u64,

    #[serde(default = "default_detail_stale")]
    pub detail_stale_secs: u64,
}

fn default_list_stale() -> u64 {
    60
}

fn default_detail_stale() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_stale_secs: default_list_stale(),
            detail_stale_secs: default_detail_stale(),
        }
    }
}

/// Browser persisted state
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_voted_polls_key")]
    pub voted_polls_key: String,
}

fn default_voted_polls_key() -> String {
    "votedPolls".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            voted_polls_key: default_voted_polls_key(),
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text, e.g. a file embedded at build time
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<embedded>"),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("pollverse").join("config.toml")),
            Some(PathBuf::from("./pollverse.toml")),
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

    fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var("POLLVERSE_CONTRACT_ADDRESS") {
            self.contract.address = address;
        }
        if let Ok(interval) = std::env::var("POLLVERSE_RECEIPT_POLL_MS") {
            if let Ok(ms) = interval.parse() {
                self.contract.receipt_poll_interval_ms = ms;
            }
        }

        if let Ok(auto) = std::env::var("POLLVERSE_AUTO_CONNECT") {
            if let Ok(flag) = auto.parse() {
                self.session.auto_connect = flag;
            }
        }

        if let Ok(key) = std::env::var("POLLVERSE_VOTED_POLLS_KEY") {
            self.storage.voted_polls_key = key;
        }

        if let Ok(level) = std::env::var("POLLVERSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("POLLVERSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        self.contract
            .address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.contract.address.clone()))
    }

    /// Settings for the chain adapter
    pub fn adapter_config(&self) -> Result<AdapterConfig, ConfigError> {
        Ok(AdapterConfig {
            contract_address: self.contract_address()?,
            receipt_poll_interval: Duration::from_millis(self.contract.receipt_poll_interval_ms),
        })
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            list_stale: chrono::Duration::seconds(self.cache.list_stale_secs as i64),
            detail_stale: chrono::Duration::seconds(self.cache.detail_stale_secs as i64),
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

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PollVerse Configuration
#
# Environment variables override these settings:
# - POLLVERSE_CONTRACT_ADDRESS
# - POLLVERSE_RECEIPT_POLL_MS
# - POLLVERSE_AUTO_CONNECT
# - POLLVERSE_VOTED_POLLS_KEY
# - POLLVERSE_LOG_LEVEL
# - POLLVERSE_LOG_FORMAT

[contract]
# Deployed poll contract
address = "0xBD22783c0905fa1c829baf4f6D047e823D4bFC6A"

# How often to ask the wallet for a transaction receipt (ms)
receipt_poll_interval_ms = 1000

[session]
# Reconnect on startup when the wallet already authorized this site
auto_connect = true

# On network switch: reload (reload the page) or reconnect (reset in place)
chain_change = "reload"

[cache]
# Seconds before the poll list is refetched
list_stale_secs = 60

# Seconds before a poll detail is refetched
detail_stale_secs = 300

[storage]
# localStorage key holding the ids of polls voted in from this browser
voted_polls_key = "votedPolls"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
