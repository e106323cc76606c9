//! TOML-based application configuration.
//!
//! Stores:
//! - Progression tunables (experience per habit, per level, level titles)
//! - Habit category presets and the default category
//!
//! Configuration is stored at `~/.config/habitforge/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::habit::Category;
use crate::progression::{
    ProgressionRules, DEFAULT_TITLES, MAX_XP_PER_HABIT, MAX_XP_PER_LEVEL, XP_PER_HABIT,
    XP_PER_LEVEL,
};

/// Progression configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_xp_per_habit")]
    pub xp_per_habit: u64,
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u64,
    #[serde(default = "default_titles")]
    pub titles: Vec<String>,
}

/// Habit presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitsConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitforge/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub habits: HabitsConfig,
}

fn default_xp_per_habit() -> u64 {
    XP_PER_HABIT
}
fn default_xp_per_level() -> u64 {
    XP_PER_LEVEL
}
fn default_titles() -> Vec<String> {
    DEFAULT_TITLES.iter().map(|t| t.to_string()).collect()
}
fn default_categories() -> Vec<String> {
    ["health", "productivity", "mindfulness", "learning"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}
fn default_category() -> String {
    "health".into()
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_habit: default_xp_per_habit(),
            xp_per_level: default_xp_per_level(),
            titles: default_titles(),
        }
    }
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: default_category(),
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Array(_) => {
                        if value.trim_start().starts_with('[') {
                            serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                        } else {
                            serde_json::Value::Array(
                                value
                                    .split(',')
                                    .map(|s| serde_json::Value::String(s.trim().to_string()))
                                    .filter(|v| v.as_str().is_some_and(|s| !s.is_empty()))
                                    .collect(),
                            )
                        }
                    }
                    serde_json::Value::Object(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Reject values the tracker cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "progression.xp_per_habit",
            self.progression.xp_per_habit,
            MAX_XP_PER_HABIT,
        )?;
        check_range(
            "progression.xp_per_level",
            self.progression.xp_per_level,
            MAX_XP_PER_LEVEL,
        )?;
        if self.progression.titles.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "progression.titles".into(),
                message: "at least one title is required".into(),
            });
        }
        if self.habits.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "habits.categories".into(),
                message: "category names must not be blank".into(),
            });
        }
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

    /// Set a config value by key in memory. The change is validated but not
    /// saved; call [`Config::save`] to persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    pub fn progression_rules(&self) -> ProgressionRules {
        ProgressionRules {
            xp_per_habit: self.progression.xp_per_habit,
            xp_per_level: self.progression.xp_per_level,
            titles: self.progression.titles.clone(),
        }
    }

    pub fn default_category(&self) -> Category {
        Category::from(self.habits.default_category.clone())
    }

    /// Category presets, in configured order.
    pub fn categories(&self) -> Vec<Category> {
        self.habits
            .categories
            .iter()
            .map(|c| Category::from(c.clone()))
            .collect()
    }
}

fn check_range(key: &str, value: u64, max: u64) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!("must be between 1 and {max}"),
        })
    }
}
