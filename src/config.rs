use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::DEFAULT_WINDOW_DAYS;
use crate::habits::DEFAULT_WEEKLY_TARGET;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Data directory path (database lives here)
    pub data_dir: PathBuf,

    /// Default athlete ID (currently active)
    pub default_athlete_id: Option<String>,

    /// Analysis window in days when not given on the command line
    pub analysis_window_days: u32,

    /// Weekly goal target used for newly created weeks
    pub weekly_goal_target: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            metadata: ConfigMetadata {
                version: "1".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings {
                data_dir: default_data_dir(),
                default_athlete_id: None,
                analysis_window_days: DEFAULT_WINDOW_DAYS,
                weekly_goal_target: DEFAULT_WEEKLY_TARGET,
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".liftrs")
}

/// Default configuration file location: `~/.liftrs/config.toml`
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

impl AppConfig {
    /// Load configuration from the given path, or the default location,
    /// falling back to defaults when no file exists yet
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_config_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Persist configuration, creating parent directories as needed
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_config_path);
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(&path, raw)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Path of the SQLite database inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.settings.data_dir.join("liftrs.db")
    }

    /// All settings as (key, value) pairs for `config --list`
    pub fn list_values(&self) -> Vec<(String, String)> {
        vec![
            (
                "data_dir".to_string(),
                self.settings.data_dir.display().to_string(),
            ),
            (
                "default_athlete_id".to_string(),
                self.settings
                    .default_athlete_id
                    .clone()
                    .unwrap_or_else(|| "(unset)".to_string()),
            ),
            (
                "analysis_window_days".to_string(),
                self.settings.analysis_window_days.to_string(),
            ),
            (
                "weekly_goal_target".to_string(),
                self.settings.weekly_goal_target.to_string(),
            ),
        ]
    }

    /// Look up a single setting for `config --get`
    pub fn get_value(&self, key: &str) -> Option<String> {
        self.list_values()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Update a single setting for `config --set key=value`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.settings.data_dir = PathBuf::from(value),
            "default_athlete_id" => self.settings.default_athlete_id = Some(value.to_string()),
            "analysis_window_days" => {
                let days: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid window days: {}", value))?;
                anyhow::ensure!(days > 0, "Analysis window must be at least one day");
                self.settings.analysis_window_days = days;
            }
            "weekly_goal_target" => {
                self.settings.weekly_goal_target = value
                    .parse()
                    .with_context(|| format!("Invalid weekly goal target: {}", value))?;
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.settings.analysis_window_days, 90);
        assert_eq!(config.settings.weekly_goal_target, 3);
        assert!(config.settings.default_athlete_id.is_none());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.set_value("weekly_goal_target", "5").unwrap();
        config.set_value("default_athlete_id", "a1").unwrap();
        config.save(Some(&path)).unwrap();

        let reloaded = AppConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(reloaded.settings.weekly_goal_target, 5);
        assert_eq!(reloaded.settings.default_athlete_id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = AppConfig::default();
        assert!(config.set_value("analysis_window_days", "0").is_err());
        assert!(config.set_value("analysis_window_days", "abc").is_err());
        assert!(config.set_value("no_such_key", "1").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = AppConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.settings.analysis_window_days, 90);
    }
}
