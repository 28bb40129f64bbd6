//! Configuration handling
//!
//! Configuration is read from an explicit path when one is given, otherwise
//! from `config.toml` in the user config directory (e.g.
//! `~/.config/todotxt/config.toml`). A missing file means defaults.
//!
//! ```toml
//! todo_file = "~/notes/todo.txt"
//! default_sort = ["due-asc", "priority-asc"]
//! ignore_comments = true
//! remove_completed_priority = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Options, SortKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// todo.txt file used when `--file` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_file: Option<PathBuf>,

    /// Sort applied by `list` when no `--sort` is given
    pub default_sort: Vec<SortKey>,

    /// Loading and rendering switches
    #[serde(flatten)]
    pub options: Options,
}

impl Config {
    /// Loads configuration from `explicit`, or from the default location
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Reads and parses a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses TOML config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Returns the user config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "todotxt").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Saves the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
