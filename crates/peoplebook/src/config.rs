//! Configuration management for peoplebook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Gender;
use crate::validate::NamePolicy;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "peoplebook";

/// Default people file name.
const DATA_FILE_NAME: &str = "people.json";

/// Default aggregate result file name.
const RESULT_FILE_NAME: &str = "result.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PEOPLEBOOK_`, `__` between sections)
/// 2. TOML config file at `~/.config/peoplebook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Record validation configuration.
    pub records: RecordsConfig,
    /// Aggregate report configuration.
    pub report: ReportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the people file.
    /// Defaults to `people.json` in the working directory.
    pub data_path: Option<PathBuf>,
    /// Path to the aggregate result file.
    /// Defaults to `result.json` in the working directory.
    pub result_path: Option<PathBuf>,
}

/// Record validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Whether a name is "Name Surname" or a single first name.
    pub name_policy: NamePolicy,
    /// Accept apostrophes inside name tokens (e.g. `O'Neil`).
    pub allow_apostrophes: bool,
    /// Smallest accepted height in centimetres (inclusive).
    pub min_height: f64,
    /// Largest accepted height in centimetres (inclusive).
    pub max_height: f64,
}

/// Aggregate report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Gender whose average height is computed.
    pub gender: Gender,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::default(),
            allow_apostrophes: false,
            min_height: 50.0,
            max_height: 250.0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PEOPLEBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let records = &self.records;
        if !records.min_height.is_finite() || !records.max_height.is_finite() {
            return Err(Error::ConfigValidation {
                message: "min_height and max_height must be finite numbers".to_string(),
            });
        }

        if records.min_height > records.max_height {
            return Err(Error::ConfigValidation {
                message: format!(
                    "min_height ({}) cannot be greater than max_height ({})",
                    records.min_height, records.max_height
                ),
            });
        }

        Ok(())
    }

    /// Get the people file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
    }

    /// Get the result file path, resolving defaults if not set.
    #[must_use]
    pub fn result_path(&self) -> PathBuf {
        self.storage
            .result_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(RESULT_FILE_NAME))
    }
}
