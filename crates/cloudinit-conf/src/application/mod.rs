//! Application layer use cases for the conf-mode handler.
//!
//! Use cases here orchestrate the pure `cloudinit_core` domain and reach the
//! host only through traits, so the whole commit path runs in unit tests
//! without touching `/etc` or `systemctl`.
//!
//! # Sub-modules
//!
//! - **`generate`** – derives the env-file contents and hands them to an
//!   [`EnvFileStore`](generate::EnvFileStore).
//! - **`apply`** – picks the enable or disable service command and issues it
//!   through a [`CommandRunner`](apply::CommandRunner).
//! - **`commit`** – the conf-mode transaction: verify, then generate, then
//!   apply, aborting before any side effect if verification fails.

pub mod apply;
pub mod commit;
pub mod generate;
