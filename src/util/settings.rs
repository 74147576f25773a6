//! Settings persistence.
//!
//! Stores the prompter configuration and studio options as pretty-printed JSON
//! in the platform config directory.

use crate::config::{ConfigError, PrompterConfig};
use crate::studio::StudioOptions;
use crate::studio_constants::APP_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name inside the app config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Everything persisted between sessions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub prompter: PrompterConfig,
    pub studio: StudioOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
    #[error("Settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Settings file contains invalid values: {0}")]
    Invalid(#[from] ConfigError),
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config_dir>/teleprompter/settings.json`
    pub fn default_location() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::ConfigDirNotFound)?;
        Ok(Self::new(dir.join(APP_DIR_NAME).join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults
    ///
    /// # Errors
    /// Unreadable files, malformed JSON and out-of-range values are errors.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                crate::debug!("No settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?;
        settings.prompter.validate()?;
        settings.studio.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                crate::warn!("Ignoring saved settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Write settings, creating the parent directory if needed
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        crate::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
