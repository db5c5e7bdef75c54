// SPDX-License-Identifier: GPL-3.0-only

//! User configuration loaded from a JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) yields
//! the stock behavior: per-field layout selection, the builtin layouts and a
//! 500 ms attach delay.

use crate::app_settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Keyboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pick the layout from the focused field's type. When `false`, every
    /// recognized field gets the alphanumeric layout.
    pub multi_mode: bool,
    /// Delay before the keyboard attaches to the page.
    pub init_delay_ms: u64,
    /// Marker class that opts any input into the alphanumeric layout.
    pub bonus_class: String,
    /// Replacement for the builtin numeric layout.
    pub numeric_layout: Option<PathBuf>,
    /// Replacement for the builtin alphanumeric layout.
    pub alphanumeric_layout: Option<PathBuf>,
    /// Default tracing directive, combined with `RUST_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            multi_mode: true,
            init_delay_ms: app_settings::DEFAULT_INIT_DELAY_MS,
            bonus_class: app_settings::DEFAULT_BONUS_CLASS.to_string(),
            numeric_layout: None,
            alphanumeric_layout: None,
            log_filter: app_settings::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Errors that can occur while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    /// The file is not valid configuration JSON.
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { source, path } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Json { source, path } => write!(
                f,
                "Invalid config {} at line {}: {}",
                path.display(),
                source.line(),
                source
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Loads the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Loads the configuration from `path` if one is given, otherwise
    /// returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
