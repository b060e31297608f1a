//! Storage infrastructure: file persistence.
//!
//! - `env_file` writes the rendered cloud-init env file that the boot script
//!   sources.
//! - `settings` reads and writes the handler's own TOML settings (env-file
//!   path, service unit, log level), falling back to defaults when absent.

pub mod env_file;
pub mod settings;
