//! Service command infrastructure.
//!
//! [`SystemCommandRunner`] executes [`ServiceCommand`]s as child processes and
//! blocks until they exit.  There is no timeout: `systemctl enable`/`disable`
//! only touch unit symlinks and return promptly.
//!
//! # Testability
//!
//! The [`CommandRunner`] trait lets tests swap in [`mock::RecordingCommandRunner`],
//! which records commands instead of running them.

use std::process::Command;

use tracing::debug;

use crate::application::apply::{CommandOutcome, CommandRunner, RunError, ServiceCommand};

pub mod mock;

/// Runs commands on the host with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &ServiceCommand) -> Result<CommandOutcome, RunError> {
        debug!(%command, "spawning");
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| RunError::Spawn {
                command: command.to_string(),
                source,
            })?;
        Ok(CommandOutcome {
            code: status.code(),
        })
    }
}
