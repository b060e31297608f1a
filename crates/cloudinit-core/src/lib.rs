//! # cloudinit-core
//!
//! Pure domain logic for the VyOS cloud-init conf-mode handler.
//!
//! The handler takes the `cloud-init` configuration subtree, checks it, and
//! turns it into a shell-sourceable env file that the boot-time provisioning
//! service reads.  This crate owns every decision in that process and none of
//! the side effects: no file system access, no child processes.
//!
//! # Architecture overview
//!
//! ```text
//! CloudInitConfig ──► verify() ──► RenderedSettings::from_config() ──► render_env_file()
//!   (dictionary)      (fail-fast)    (metadata-service defaults)        (5-line env file)
//! ```
//!
//! - **`domain`** – the configuration dictionary, the supported cloud
//!   environments, the verifier and its error enum, and the derived settings.
//! - **`render`** – formats [`RenderedSettings`] as `NAME="value"` lines.
//!
//! Writing the file and toggling the service live in `cloudinit-conf`.

pub mod domain;
pub mod render;

pub use domain::config::CloudInitConfig;
pub use domain::environment::{Environment, UnsupportedEnvironment};
pub use domain::settings::{
    RenderedSettings, DEFAULT_SSH_USER, METADATA_SSH_KEY_URL, METADATA_USER_DATA_URL,
};
pub use domain::verify::{verify, VerifyError, ACCEPTED_URL_SCHEMES};
pub use render::{render_env_file, ENV_FILE_HEADER};
