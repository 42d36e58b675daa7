//! Host configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Where the counter lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Stands in for the platform's document/files directory. The `shared`
    /// directory is created beneath it.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Widget behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Minutes a widget timeline stays valid
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
    /// Whether widget buttons can run actions (off for old systems)
    #[serde(default = "default_interactive")]
    pub interactive: bool,
}

/// Longest timeline lifetime honoured, one day.
pub const MAX_REFRESH_MINUTES: u64 = 24 * 60;

fn default_refresh_minutes() -> u64 {
    5
}
fn default_interactive() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            interactive: default_interactive(),
        }
    }
}

impl WidgetConfig {
    pub fn refresh_interval(&self) -> Duration {
        let minutes = self.refresh_minutes.clamp(1, MAX_REFRESH_MINUTES);
        Duration::from_secs(minutes.saturating_mul(60))
    }
}

/// Logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter; `RUST_LOG` wins when set
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load from the default location; defaults if there is no file.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Configured root, else the platform data directory.
    pub fn storage_root(&self) -> Result<PathBuf> {
        match &self.storage.root {
            Some(root) => Ok(root.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "counterwidgetapp", "CounterWidgetApp")
        .context("Failed to determine data directory")
}
