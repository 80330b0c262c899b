// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Persisted as JSON under the user config directory. Missing or unreadable
//! configuration falls back to defaults.

use crate::constants::DEFAULT_SAVE_FOLDER;
use crate::filters::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Application name used for the config directory
const APP_NAME: &str = "filter-camera";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where photos and recordings are saved
    /// (default: ~/Downloads/FilterCamera)
    pub output_dir: Option<PathBuf>,
    /// Filter selected at startup
    pub startup_filter: FilterType,
    /// Mirror the live preview horizontally (selfie mode); stills and
    /// recordings are never mirrored
    pub mirror_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            startup_filter: FilterType::default(),
            mirror_preview: true,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid configuration, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist configuration as JSON
    pub fn save(&self) -> crate::errors::AppResult<()> {
        let Some(path) = Self::config_path() else {
            return Err(crate::errors::AppError::Storage(
                "No config directory available".to_string(),
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| crate::errors::AppError::Storage(e.to_string()))?;
        std::fs::write(&path, contents)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Path of the config file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory artifacts are saved into
    ///
    /// Falls back through the download directory and the home directory to
    /// the current directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join(DEFAULT_SAVE_FOLDER)
    }
}
