//! TOML-based application configuration.
//!
//! Stores:
//! - Engine tunables (score increments, XP ranges, focus probability)
//! - The default weekly challenge
//! - Logging level
//!
//! Configuration is stored at `~/.config/growthtree/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::challenge::WeeklyChallenge;
use crate::error::ConfigError;

/// Progress engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Category boost for completing a habit
    #[serde(default = "default_habit_boost")]
    pub habit_boost: f64,
    /// Category boost for completing a goal
    #[serde(default = "default_goal_boost")]
    pub goal_boost: f64,
    /// Category boost for a take-action event
    #[serde(default = "default_action_boost")]
    pub action_boost: f64,
    #[serde(default = "default_action_xp_min")]
    pub action_xp_min: u32,
    #[serde(default = "default_action_xp_max")]
    pub action_xp_max: u32,
    /// Chance a take-action event lands in the focus category
    #[serde(default = "default_focus_probability")]
    pub focus_probability: f64,
    #[serde(default = "default_reflection_xp")]
    pub reflection_xp: u32,
}

/// Default weekly challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChallengeConfig {
    #[serde(default = "default_challenge_title")]
    pub title: String,
    #[serde(default = "default_challenge_description")]
    pub description: String,
    #[serde(default = "default_challenge_target")]
    pub target: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/growthtree/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub challenge: ChallengeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_habit_boost() -> f64 {
    0.02
}
fn default_goal_boost() -> f64 {
    0.15
}
fn default_action_boost() -> f64 {
    0.1
}
fn default_action_xp_min() -> u32 {
    25
}
fn default_action_xp_max() -> u32 {
    75
}
fn default_focus_probability() -> f64 {
    0.7
}
fn default_reflection_xp() -> u32 {
    50
}
fn default_challenge_title() -> String {
    "Take 5 actions this week".into()
}
fn default_challenge_description() -> String {
    "Complete five small actions across any category before Sunday.".into()
}
fn default_challenge_target() -> u32 {
    5
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            habit_boost: default_habit_boost(),
            goal_boost: default_goal_boost(),
            action_boost: default_action_boost(),
            action_xp_min: default_action_xp_min(),
            action_xp_max: default_action_xp_max(),
            focus_probability: default_focus_probability(),
            reflection_xp: default_reflection_xp(),
        }
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            title: default_challenge_title(),
            description: default_challenge_description(),
            target: default_challenge_target(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Inclusive XP range for take-action events, ordered low to high.
    pub fn action_xp_range(&self) -> (u32, u32) {
        let (a, b) = (self.action_xp_min, self.action_xp_max);
        (a.min(b), a.max(b))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("engine.habit_boost", self.habit_boost),
            ("engine.goal_boost", self.goal_boost),
            ("engine.action_boost", self.action_boost),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be within [0, 1], got {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.focus_probability) {
            return Err(ConfigError::InvalidValue {
                key: "engine.focus_probability".to_string(),
                message: format!("must be within [0, 1], got {}", self.focus_probability),
            });
        }
        if self.action_xp_min > self.action_xp_max {
            return Err(ConfigError::InvalidValue {
                key: "engine.action_xp_min".to_string(),
                message: format!(
                    "must not exceed engine.action_xp_max ({} > {})",
                    self.action_xp_min, self.action_xp_max
                ),
            });
        }
        Ok(())
    }
}

impl ChallengeConfig {
    pub fn build(&self, today: NaiveDate) -> WeeklyChallenge {
        WeeklyChallenge::new(&self.title, &self.description, self.target, today)
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(n) if n.is_f64() => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".to_string()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config path inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from a specific path, writing defaults there when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.engine.validate()?;
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

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. The updated engine section
    /// must still validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.engine.validate()?;
        *self = updated;
        Ok(())
    }
}
