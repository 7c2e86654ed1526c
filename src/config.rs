//! Configuration loading and management
//!
//! Handles parsing of `taskboard.toml` in the data directory and resolution of
//! the data directory itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::task::{Priority, TaskStatus};

/// Configuration file name inside the data directory
pub const CONFIG_FILE: &str = "taskboard.toml";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TASKBOARD_DIR";

/// Longest accepted analytics window, about ten years
pub const MAX_WEEK_DAYS: u32 = 3650;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task defaults and storage
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Analytics windows
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Tasks configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Priority for new tasks created without one
    #[serde(default = "default_priority")]
    pub default_priority: Priority,

    /// Status for new tasks created without one
    #[serde(default = "default_status")]
    pub default_status: TaskStatus,

    /// Key holding the collection in the byte store
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_status() -> TaskStatus {
    TaskStatus::ToDo
}

fn default_storage_key() -> String {
    crate::storage::TASKS_KEY.to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            default_status: default_status(),
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Days counted as "this week"
    #[serde(default = "default_week_days")]
    pub week_days: u32,

    /// Categories shown in the breakdown
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

fn default_week_days() -> u32 {
    7
}

fn default_top_categories() -> usize {
    5
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            week_days: default_week_days(),
            top_categories: default_top_categories(),
        }
    }
}

impl Config {
    /// Load configuration from a `taskboard.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        Self::load_from_dir_checked(data_dir).0
    }

    /// Like [`Config::load_from_dir`], also returning a user-facing warning
    /// when an existing file was ignored.
    pub fn load_from_dir_checked(data_dir: &Path) -> (Self, Option<String>) {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return (Self::default(), None);
        }
        match Self::load(&config_path) {
            Ok(config) => (config, None),
            Err(err) => {
                tracing::warn!(
                    target: "taskboard::config",
                    path = %config_path.display(),
                    error = %err,
                    "ignoring invalid config"
                );
                let warning = format!(
                    "ignoring {} ({err}); using default settings",
                    config_path.display()
                );
                (Self::default(), Some(warning))
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.tasks.validate()?;
        self.analytics.validate()?;
        Ok(())
    }
}

impl TasksConfig {
    fn validate(&self) -> Result<()> {
        let key = self.storage_key.as_str();
        if key.is_empty() {
            return Err(Error::InvalidConfig(
                "tasks.storage_key cannot be empty".to_string(),
            ));
        }
        if !key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(Error::InvalidConfig(format!(
                "tasks.storage_key '{key}' must be alphanumeric, '-' or '_'"
            )));
        }
        Ok(())
    }
}

impl AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        if self.week_days == 0 || self.week_days > MAX_WEEK_DAYS {
            return Err(Error::InvalidConfig(format!(
                "analytics.week_days must be between 1 and {MAX_WEEK_DAYS}"
            )));
        }
        if self.top_categories == 0 {
            return Err(Error::InvalidConfig(
                "analytics.top_categories must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pick the data directory: explicit flag, then `TASKBOARD_DIR`, then the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    directories::ProjectDirs::from("", "", "taskboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "cannot determine a data directory; pass --dir or set {DATA_DIR_ENV}"
            ))
        })
}
