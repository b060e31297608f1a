//! Domain model for the cloud-init handler.
//!
//! Everything here is deterministic and side-effect free, so the whole
//! verify/derive path can be tested without touching the host.

pub mod config;
pub mod environment;
pub mod settings;
pub mod verify;
