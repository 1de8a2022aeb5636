//! Configuration loading and management
//!
//! Handles parsing of `.daybook.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;
use crate::task::{TaskStatus, TaskType};

/// Name of the configuration file at the daybook root
pub const CONFIG_FILE: &str = ".daybook.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the task collection, relative to the root
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Tasks configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreConfig::default(),
            tasks: TasksConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".daybook")
}

/// Store-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a write waits for the collection lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Tasks configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Status for new tasks that do not name one
    #[serde(default = "default_task_status")]
    pub default_status: String,

    /// Type for new tasks that do not name one
    #[serde(default = "default_task_type")]
    pub default_type: String,
}

fn default_task_status() -> String {
    TaskStatus::default().as_str().to_string()
}

fn default_task_type() -> String {
    TaskType::default().as_str().to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_status: default_task_status(),
            default_type: default_task_type(),
        }
    }
}

impl TasksConfig {
    pub fn initial_status(&self) -> Result<TaskStatus> {
        self.default_status.parse()
    }

    pub fn initial_type(&self) -> Result<TaskType> {
        self.default_type.parse()
    }

    fn validate(&self) -> Result<()> {
        self.initial_status().map_err(|err| {
            Error::InvalidConfig(format!("tasks.default_status: {err}"))
        })?;
        self.initial_type()
            .map_err(|err| Error::InvalidConfig(format!("tasks.default_type: {err}")))?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `.daybook.toml` file
    ///
    /// Malformed TOML and out-of-range values are both `InvalidConfig`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|err| Error::InvalidConfig(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the daybook root, or return defaults
    pub fn load_from_root(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Absolute location of the task collection directory
    pub fn data_dir_in(&self, root: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            root.join(&self.data_dir)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("data_dir cannot be empty".to_string()));
        }
        if self.store.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "store.lock_timeout_ms must be > 0".to_string(),
            ));
        }
        self.tasks.validate()?;
        Ok(())
    }
}
