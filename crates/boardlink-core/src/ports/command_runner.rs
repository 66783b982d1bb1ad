//! Command runner trait definition.
//!
//! This port abstracts launching an external command with captured
//! output. Implementations handle all process lifecycle details
//! internally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// What to launch: a program and its arguments.
///
/// There is no shell interpretation; the arguments are passed to the OS
/// process-creation primitive as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a spec with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program followed by its arguments, for log lines.
    #[must_use]
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    /// The process terminated on its own with this exit code.
    Exited(i32),
    /// The wait was abandoned because the caller's cancellation fired.
    Cancelled,
}

impl CommandStatus {
    /// Exit code 0 is the only success; anything else is failure.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

/// A finished (or abandoned) run with whatever output had arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRun {
    /// How the run ended.
    pub status: CommandStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Errors for command launches that never produced a run.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("Failed to launch {program}: {reason}")]
    SpawnFailed { program: String, reason: String },
}

/// Launches external commands with captured output.
///
/// # Design Rules
///
/// - Output is streamed as it arrives, never buffered-then-read, so a
///   full pipe buffer can't deadlock the child
/// - The wait is cooperative; cancellation returns promptly instead of
///   waiting for natural exit
/// - No output parsing; captured text is retained only for diagnostics
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// Run `spec` to completion or until `cancel` fires.
    async fn run(
        &self,
        spec: &CommandSpec,
        cancel: &CancellationToken,
    ) -> Result<CommandRun, CommandError>;
}
