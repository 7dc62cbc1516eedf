//! # Configuration
//!
//! Configuration is managed by [`confique`], layered from environment variables,
//! an optional TOML file, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SITENOTES_RATE_LIMIT`, `SITENOTES_TIMESTAMP_FORMAT`,
//!    `SITENOTES_STORE`.
//! 2. **Config file**: `sitenotes.toml` in the OS config directory (via the
//!    `directories` crate), or an explicit path.
//! 3. **Compiled defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `rate_limit_per_minute` | `30` | Mutations allowed per operation and domain per minute |
//! | `timestamp_format` | `%-m/%-d/%Y, %-I:%M:%S %p` | `strftime` layout for display, search, export |
//! | `store_file` | data dir `store.json` | JSON file backing the note store |

use crate::error::{NotesError, Result};
use crate::model::{is_valid_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};
use crate::rate_limit::DEFAULT_MAX_PER_MINUTE;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sitenotes.toml";
pub const STORE_FILE_NAME: &str = "store.json";

/// Configuration for sitenotes, stored in `sitenotes.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Mutating calls allowed per operation key per minute.
    #[config(default = 30, env = "SITENOTES_RATE_LIMIT")]
    pub rate_limit_per_minute: usize,

    /// `strftime` layout for human-readable timestamps.
    #[config(default = "%-m/%-d/%Y, %-I:%M:%S %p", env = "SITENOTES_TIMESTAMP_FORMAT")]
    pub timestamp_format: String,

    /// Location of the JSON store. When absent, the OS data directory is used.
    #[config(env = "SITENOTES_STORE")]
    pub store_file: Option<PathBuf>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: DEFAULT_MAX_PER_MINUTE,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            store_file: None,
        }
    }
}

impl NotesConfig {
    /// Load from the environment, then `path` if given, else the default
    /// config file if it exists. Fails on a `timestamp_format` chrono cannot
    /// render.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = NotesConfig::builder().env();
        match path {
            Some(p) => builder = builder.file(p),
            None => {
                if let Some(default) = default_config_path() {
                    builder = builder.file(default);
                }
            }
        }
        let config = builder
            .load()
            .map_err(|e| NotesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(NotesError::Config(format!(
                "invalid timestamp_format '{}'",
                self.timestamp_format
            )));
        }
        Ok(())
    }

    /// The configured store file, or `store.json` in the OS data directory.
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_file {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
            .ok_or_else(|| {
                NotesError::Config("could not determine a data directory".to_string())
            })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sitenotes", "sitenotes")
}

/// `sitenotes.toml` in the OS config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
