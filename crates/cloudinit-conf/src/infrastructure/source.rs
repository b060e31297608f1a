//! Configuration-dictionary source.
//!
//! The handler does not read the router's configuration tree itself.  The
//! binary receives the `cloud-init` subtree either as a TOML file with
//! kebab-case keys or as individual command-line values, and this module
//! turns those into a [`CloudInitConfig`].

use std::path::{Path, PathBuf};

use cloudinit_core::CloudInitConfig;
use thiserror::Error;
use tracing::debug;

/// Error type for reading a configuration dictionary.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading cloud-init config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cloud-init config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reads a [`CloudInitConfig`] from a TOML file.
///
/// Unlike handler settings, a missing file is an error: the caller asked for
/// this specific file.  An empty file is a valid, disabled configuration.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be read and
/// [`SourceError::Parse`] for malformed TOML or unknown keys.
pub fn load_config_file(path: &Path) -> Result<CloudInitConfig, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CloudInitConfig = toml::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?config, "loaded cloud-init config");
    Ok(config)
}

/// Builds the effective configuration: the optional file, overlaid with any
/// values given individually.
///
/// # Errors
///
/// Propagates [`load_config_file`] errors.
pub fn resolve_config(
    file: Option<&Path>,
    overrides: CloudInitConfig,
) -> Result<CloudInitConfig, SourceError> {
    let base = match file {
        Some(path) => load_config_file(path)?,
        None => CloudInitConfig::default(),
    };
    Ok(base.merge(overrides))
}
