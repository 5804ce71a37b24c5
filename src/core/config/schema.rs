//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing: `default_tier` must name a tier and
//! `log.level` must be a known log level. Unknown keys are rejected by
//! serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;
use crate::core::types::Tier;

/// Log levels accepted by `log.level`.
pub const VALID_LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Keys understood by `hdx config get|set`.
pub const KEYS: &[&str] = &["data_file", "default_tier", "log.level"];

/// User configuration.
///
/// # Example
///
/// ```toml
/// data_file = "/home/me/heroes.json"
/// default_tier = "T1"
///
/// [log]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HerodexConfig {
    /// Path of the JSON snapshot.
    pub data_file: Option<PathBuf>,

    /// Tier given to heroes added without one.
    pub default_tier: Option<String>,

    pub log: Option<LogConfig>,
}

/// `[log]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: Option<String>,
}

impl HerodexConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tier) = &self.default_tier {
            if Tier::parse(tier).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid default_tier '{}', must be one of: {}",
                    tier,
                    tier_labels()
                )));
            }
        }

        if let Some(level) = self.log.as_ref().and_then(|l| l.level.as_ref()) {
            if !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log level '{}', must be one of: {}",
                    level,
                    VALID_LOG_LEVELS.join(", ")
                )));
            }
        }

        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "data_file cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Read one key as a string, `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "data_file" => Ok(self.data_file.as_ref().map(|p| p.display().to_string())),
            "default_tier" => Ok(self.default_tier.clone()),
            "log.level" => Ok(self.log.as_ref().and_then(|l| l.level.clone())),
            other => Err(unknown_key(other)),
        }
    }

    /// Set one key from a string. The result is validated.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "data_file" => self.data_file = Some(PathBuf::from(value)),
            "default_tier" => {
                let tier = Tier::parse(value).ok_or_else(|| {
                    ConfigError::InvalidValue(format!(
                        "invalid default_tier '{}', must be one of: {}",
                        value,
                        tier_labels()
                    ))
                })?;
                self.default_tier = Some(tier.label().to_string());
            }
            "log.level" => {
                let level = value.to_ascii_lowercase();
                if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                    return Err(ConfigError::InvalidValue(format!(
                        "invalid log level '{}', must be one of: {}",
                        value,
                        VALID_LOG_LEVELS.join(", ")
                    )));
                }
                self.log.get_or_insert_with(LogConfig::default).level = Some(level);
            }
            other => return Err(unknown_key(other)),
        }
        self.validate()
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::InvalidValue(format!(
        "unknown config key '{}', expected one of: {}",
        key,
        KEYS.join(", ")
    ))
}

fn tier_labels() -> String {
    Tier::ALL
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}
