//! TOML-based settings for the handler itself.
//!
//! These are not part of the router configuration; they say where the handler
//! writes and which unit it toggles.  The file is optional and every field
//! has a default, so a missing or partial file still yields a usable setup:
//!
//! ```toml
//! env_file = "/etc/vyos-cloudinit.conf"
//! service_unit = "vyos-cloudinit.service"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::apply::DEFAULT_SERVICE_UNIT;
use crate::application::generate::DEFAULT_ENV_FILE;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Handler settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerSettings {
    /// Env file sourced by the cloud-init boot script.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
    /// systemd unit enabled or disabled on commit.
    #[serde(default = "default_service_unit")]
    pub service_unit: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(DEFAULT_ENV_FILE)
}
fn default_service_unit() -> String {
    DEFAULT_SERVICE_UNIT.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            service_unit: default_service_unit(),
            log_level: default_log_level(),
        }
    }
}

/// Loads settings from `path`, returning the defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<HandlerSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HandlerSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `settings` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings(path: &Path, settings: &HandlerSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
