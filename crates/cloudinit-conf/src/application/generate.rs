//! Generate: render the cloud-init env file and persist it.
//!
//! The target path is always passed in by the caller, never read from a
//! global, so tests point it at a scratch location.

use std::path::{Path, PathBuf};

use cloudinit_core::{render_env_file, CloudInitConfig, RenderedSettings};
use thiserror::Error;
use tracing::info;

/// Default location of the env file sourced by the boot script.
pub const DEFAULT_ENV_FILE: &str = "/etc/vyos-cloudinit.conf";

/// Error type for env-file generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The env file could not be written.
    #[error("I/O error writing env file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for rendered env-file contents.
///
/// Writes must replace any previous contents entirely.
pub trait EnvFileStore: Send + Sync {
    fn write(&self, path: &Path, contents: &str) -> Result<(), GenerateError>;
}

/// Renders `config` and writes it to `path` through `store`.
///
/// The configuration is not validated here; run
/// [`cloudinit_core::verify`] first.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] if the store fails to write.
pub fn generate(
    config: &CloudInitConfig,
    path: &Path,
    store: &dyn EnvFileStore,
) -> Result<(), GenerateError> {
    let settings = RenderedSettings::from_config(config);
    let contents = render_env_file(&settings);
    store.write(path, &contents)?;
    info!(
        path = %path.display(),
        environment = %settings.environment,
        "wrote cloud-init env file"
    );
    Ok(())
}
