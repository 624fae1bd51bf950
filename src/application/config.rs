//! Application configuration loaded from environment variables.

use crate::infrastructure::recognition::DEFAULT_TOP_K;
use std::path::PathBuf;
use std::{env, fmt};
use tracing::info;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the reference food dataset (JSON array of records)
    pub reference_path: PathBuf,
    /// Path to the food log (JSON lines, one entry per line)
    pub entries_path: PathBuf,
    /// Default number of recognition results per description
    pub default_top_k: usize,
}

/// Error type for configuration validation
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid value
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("data/foods.json"),
            entries_path: PathBuf::from("data/entries.jsonl"),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BENTO_REFERENCE_PATH`: Reference dataset path (default: "data/foods.json")
    /// - `BENTO_ENTRIES_PATH`: Food log path (default: "data/entries.jsonl")
    /// - `BENTO_TOP_K`: Default number of recognition results (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(path) = env::var("BENTO_REFERENCE_PATH") {
            config.reference_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("BENTO_ENTRIES_PATH") {
            config.entries_path = PathBuf::from(path);
        }
        if let Ok(raw) = env::var("BENTO_TOP_K") {
            config.default_top_k = raw.parse().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "BENTO_TOP_K must be a non-negative integer, got {:?}",
                    raw
                ))
            })?;
        }
        Ok(config)
    }

    /// Log the effective configuration.
    pub fn log(&self) {
        info!(
            reference_path = %self.reference_path.display(),
            entries_path = %self.entries_path.display(),
            default_top_k = self.default_top_k,
            "configuration loaded"
        );
    }
}
