//! Configuration file parsing and validation.
//!
//! This module handles loading and validating sqlite-alter.toml configuration files.

use camino::Utf8Path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "sqlite-alter.toml";

/// Affixes may only contain characters that are valid in a bare SQLite identifier
static AFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*$").expect("valid affix pattern"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid temporary table affix: {0:?}. Only letters, digits and underscores are allowed")]
    InvalidTableAffix(String),

    #[error("temp_table_prefix and temp_table_suffix cannot both be empty: the replacement table would reuse the original name")]
    EmptyTableAffixes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prepended to the table name to name the replacement table built during a rebuild
    pub temp_table_prefix: String,

    /// Appended to the table name to name the replacement table built during a rebuild
    pub temp_table_suffix: String,

    /// Emit DROP TABLE and RENAME TO after copying rows, so the replacement table
    /// takes the original name
    pub finalize_rebuild: bool,

    /// Reject renames that target a name already introduced in the same request
    pub strict_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_table_prefix: "_".to_string(),
            temp_table_suffix: "_tmp".to_string(),
            finalize_rebuild: false,
            strict_names: true,
        }
    }
}

impl Config {
    /// Load config from sqlite-alter.toml in current directory
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Utf8Path::new(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(config_path)
    }

    /// Load config from specific path (useful for testing)
    pub fn load_from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        for affix in [&self.temp_table_prefix, &self.temp_table_suffix] {
            if !AFFIX_PATTERN.is_match(affix) {
                return Err(ConfigError::InvalidTableAffix(affix.clone()));
            }
        }

        if self.temp_table_prefix.is_empty() && self.temp_table_suffix.is_empty() {
            return Err(ConfigError::EmptyTableAffixes);
        }

        Ok(())
    }
}
