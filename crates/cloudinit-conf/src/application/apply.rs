//! Apply: enable or disable the cloud-init service.
//!
//! A non-empty configuration enables the unit, an empty one disables it.
//! Exactly one command is issued per call.  Its outcome is logged but not
//! returned as an error; the surrounding commit reports overall success.

use std::fmt;

use cloudinit_core::CloudInitConfig;
use thiserror::Error;
use tracing::{error, info, warn};

/// Service manager binary used for both commands.
pub const SERVICE_MANAGER: &str = "systemctl";
/// Unit toggled by the handler.
pub const DEFAULT_SERVICE_UNIT: &str = "vyos-cloudinit.service";

/// Which way the service was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Enable,
    Disable,
}

impl ServiceAction {
    /// Picks the action for `config`.
    pub fn for_config(config: &CloudInitConfig) -> Self {
        if config.is_empty() {
            ServiceAction::Disable
        } else {
            ServiceAction::Enable
        }
    }

    /// The `systemctl` verb for this action.
    pub fn verb(self) -> &'static str {
        match self {
            ServiceAction::Enable => "enable",
            ServiceAction::Disable => "disable",
        }
    }
}

/// An external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ServiceCommand {
    /// `systemctl <verb> <unit>`.
    pub fn new(action: ServiceAction, unit: &str) -> Self {
        Self {
            program: SERVICE_MANAGER.to_string(),
            args: vec![action.verb().to_string(), unit.to_string()],
        }
    }

    /// `systemctl enable <unit>`.
    pub fn enable(unit: &str) -> Self {
        Self::new(ServiceAction::Enable, unit)
    }

    /// `systemctl disable <unit>`.
    pub fn disable(unit: &str) -> Self {
        Self::new(ServiceAction::Disable, unit)
    }
}

impl fmt::Display for ServiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum RunError {
    /// The process could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs external commands and waits for them to exit.
///
/// The production implementation lives in `infrastructure::service`; tests
/// inject a recording or `mockall` runner.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &ServiceCommand) -> Result<CommandOutcome, RunError>;
}

/// Issues the enable or disable command for `unit` and returns which one.
pub fn apply(config: &CloudInitConfig, runner: &dyn CommandRunner, unit: &str) -> ServiceAction {
    let action = ServiceAction::for_config(config);
    let command = ServiceCommand::new(action, unit);
    info!(%command, "toggling cloud-init service");

    match runner.run(&command) {
        Ok(outcome) if outcome.is_success() => {}
        Ok(outcome) => warn!(%command, code = ?outcome.code, "service command exited unsuccessfully"),
        Err(e) => error!("{e}"),
    }
    action
}
