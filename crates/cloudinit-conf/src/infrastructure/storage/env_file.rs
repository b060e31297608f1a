//! File-system backed [`EnvFileStore`].
//!
//! Writes go through [`std::fs::write`], which creates or truncates the target.
//! A crash mid-write can leave a truncated file; re-running the commit
//! regenerates it in full.

use std::path::Path;

use crate::application::generate::{EnvFileStore, GenerateError};

/// Writes env files directly to the host file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEnvFileStore;

impl FsEnvFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl EnvFileStore for FsEnvFileStore {
    fn write(&self, path: &Path, contents: &str) -> Result<(), GenerateError> {
        std::fs::write(path, contents).map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
