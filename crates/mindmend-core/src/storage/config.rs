//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Insight window and trend lengths
//! - Whether the daily streak badge is evaluated at all
//! - Where the device-local badge state lives
//!
//! Configuration is stored at `~/.config/mindmend/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::insights::{DEFAULT_TREND_DAYS, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// Mood insight configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

/// Streak badge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Device-local state storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file for badge state, relative to the data dir unless absolute.
    #[serde(default = "default_state_db")]
    pub state_db: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindmend/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}
fn default_trend_days() -> u32 {
    DEFAULT_TREND_DAYS
}
fn default_true() -> bool {
    true
}
fn default_state_db() -> String {
    "state.db".into()
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            trend_days: default_trend_days(),
        }
    }
}

impl InsightsConfig {
    /// Check both lengths are within `1..=MAX_WINDOW_DAYS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, days) in [
            ("insights.window_days", self.window_days),
            ("insights.trend_days", self.trend_days),
        ] {
            if !(1..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("{days} is not between 1 and {MAX_WINDOW_DAYS}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_db: default_state_db(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|e| invalid(format!("cannot parse '{value}' as number: {e}")))?;
                    if part.ends_with("_days") && !(1..=u64::from(MAX_WINDOW_DAYS)).contains(&n) {
                        return Err(invalid(format!("must be between 1 and {MAX_WINDOW_DAYS}")));
                    }
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                CoreError::Config(ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.insights.validate()?;
        Ok(cfg)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Absolute path of the badge state database.
    pub fn state_db_path(&self) -> Result<PathBuf> {
        let configured = PathBuf::from(&self.storage.state_db);
        if configured.is_absolute() {
            Ok(configured)
        } else {
            Ok(data_dir()?.join(configured))
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("using default configuration: {e}");
            Self::default()
        })
    }
}
