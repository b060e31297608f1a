//! Commit: the conf-mode transaction for the `cloud-init` subtree.
//!
//! ```text
//! verify ──fail──► CommitError::Verify   (nothing written, nothing run)
//!   │
//!   ▼
//! generate ──fail──► CommitError::Generate (service left untouched)
//!   │
//!   ▼
//! apply ──► CommitOutcome { action: Enable | Disable }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cloudinit_core::{verify, CloudInitConfig, VerifyError};
use thiserror::Error;
use tracing::{debug, info};

use super::apply::{apply, CommandRunner, ServiceAction};
use super::generate::{generate, EnvFileStore, GenerateError};

/// Error type for a failed commit.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The configuration was rejected; surfaced to the operator as a
    /// configuration error.
    #[error("configuration error: {0}")]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub env_file: PathBuf,
    pub action: ServiceAction,
}

/// Runs verify → generate → apply against injected collaborators.
pub struct ConfModeHandler {
    env_file: PathBuf,
    service_unit: String,
    store: Arc<dyn EnvFileStore>,
    runner: Arc<dyn CommandRunner>,
}

impl ConfModeHandler {
    pub fn new(
        env_file: impl Into<PathBuf>,
        service_unit: impl Into<String>,
        store: Arc<dyn EnvFileStore>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            env_file: env_file.into(),
            service_unit: service_unit.into(),
            store,
            runner,
        }
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    pub fn service_unit(&self) -> &str {
        &self.service_unit
    }

    /// Verifies `config` without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::Verify`] with the first rule `config` breaks.
    pub fn verify(&self, config: &CloudInitConfig) -> Result<(), CommitError> {
        verify(config)?;
        debug!("cloud-init configuration verified");
        Ok(())
    }

    /// Runs the full transaction.
    ///
    /// # Errors
    ///
    /// [`CommitError::Verify`] before any side effect, or
    /// [`CommitError::Generate`] if the env file cannot be written, in which
    /// case no service command is issued.
    pub fn commit(&self, config: &CloudInitConfig) -> Result<CommitOutcome, CommitError> {
        self.verify(config)?;
        generate(config, &self.env_file, self.store.as_ref())?;
        let action = apply(config, self.runner.as_ref(), &self.service_unit);
        info!(?action, "cloud-init commit complete");
        Ok(CommitOutcome {
            env_file: self.env_file.clone(),
            action,
        })
    }
}
