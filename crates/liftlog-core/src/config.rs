//! Dashboard configuration.
//!
//! Read from the path given on the command line, else from the file named by
//! `LIFTLOG_CONFIG`, else built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::time_window::TimeWindow;

pub const CONFIG_ENV: &str = "LIFTLOG_CONFIG";
pub const DEFAULT_EXERCISE: &str = "Bench Press (Barbell)";
pub const DEFAULT_RECENT_SET_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Exercise preselected when it appears in the option list.
    pub default_exercise: String,
    /// Rows shown in the recent-sets table.
    pub recent_set_limit: usize,
    pub default_window: TimeWindow,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_exercise: DEFAULT_EXERCISE.to_string(),
            recent_set_limit: DEFAULT_RECENT_SET_LIMIT,
            default_window: TimeWindow::AllTime,
        }
    }
}

impl DashboardConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim())),
            _ => {
                debug!("no dashboard config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
