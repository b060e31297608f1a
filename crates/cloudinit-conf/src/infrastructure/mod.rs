//! Infrastructure layer for the conf-mode handler.
//!
//! Contains OS-facing adapters: env-file and settings storage, the service
//! command runner, and the configuration-dictionary source.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cloudinit_core`, but MUST NOT be imported by either.  It implements the
//! ports the application layer defines:
//! [`CommandRunner`](crate::application::apply::CommandRunner) and
//! [`EnvFileStore`](crate::application::generate::EnvFileStore).

pub mod service;
pub mod source;
pub mod storage;
