//! Recording command runner for tests and dry runs.
//!
//! Records every [`ServiceCommand`] it is asked to run and reports a
//! configurable outcome, without touching the host's service manager.

use std::sync::{Arc, Mutex};

use crate::application::apply::{CommandOutcome, CommandRunner, RunError, ServiceCommand};

/// A [`CommandRunner`] that records commands instead of executing them.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the handler.
#[derive(Clone)]
pub struct RecordingCommandRunner {
    commands: Arc<Mutex<Vec<ServiceCommand>>>,
    exit_code: Option<i32>,
}

impl RecordingCommandRunner {
    /// Creates a runner whose commands all "succeed".
    pub fn new() -> Self {
        Self::with_exit_code(Some(0))
    }

    /// Creates a runner that reports `exit_code` for every command.
    pub fn with_exit_code(exit_code: Option<i32>) -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            exit_code,
        }
    }

    /// Returns every command recorded so far, oldest first.
    pub fn commands(&self) -> Vec<ServiceCommand> {
        self.commands.lock().expect("lock poisoned").clone()
    }
}

impl Default for RecordingCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, command: &ServiceCommand) -> Result<CommandOutcome, RunError> {
        self.commands
            .lock()
            .expect("lock poisoned")
            .push(command.clone());
        Ok(CommandOutcome {
            code: self.exit_code,
        })
    }
}
