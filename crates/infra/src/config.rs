//! Configuration loading and representation.
//!
//! Everything comes from environment variables with defaults matching the
//! file names the terminal has always used in its working directory.

use std::path::PathBuf;

use thiserror::Error;

use pos_observability::LogFormat;

pub const ENV_CATALOG_PATH: &str = "POS_CATALOG_PATH";
pub const ENV_LEDGER_PATH: &str = "POS_LEDGER_PATH";
pub const ENV_RECEIPT_DIR: &str = "POS_RECEIPT_DIR";
pub const ENV_LOG_FORMAT: &str = "POS_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported POS_LOG_FORMAT '{0}' (expected 'text' or 'json')")]
    LogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosConfig {
    pub catalog_path: PathBuf,
    pub ledger_path: PathBuf,
    pub receipt_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("items.json"),
            ledger_path: PathBuf::from("report.json"),
            receipt_dir: PathBuf::from("."),
            log_format: LogFormat::Text,
        }
    }
}

impl PosConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(raw) => LogFormat::parse(&raw).ok_or(ConfigError::LogFormat(raw))?,
            None => defaults.log_format,
        };

        Ok(Self {
            catalog_path: get(ENV_CATALOG_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            ledger_path: get(ENV_LEDGER_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.ledger_path),
            receipt_dir: get(ENV_RECEIPT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.receipt_dir),
            log_format,
        })
    }
}
