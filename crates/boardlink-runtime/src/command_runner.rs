//! Tokio-based command runner.
//!
//! Runs an external command with both standard streams piped and drained
//! as they arrive. External tooling can emit non-UTF8 bytes, and
//! `BufReader::lines()` would terminate a reader task on the first bad
//! byte, so the readers work on raw bytes with lossy UTF-8 decoding.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use boardlink_core::ports::{
    CommandError, CommandRun, CommandRunnerPort, CommandSpec, CommandStatus,
};

/// Command runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Create a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Drain `stream` into `buf` line by line until EOF.
fn spawn_capture_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    buf: Arc<Mutex<String>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut line: Vec<u8> = Vec::with_capacity(1024);
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let text = String::from_utf8_lossy(&line);
                    buf.lock().await.push_str(&text);
                }
                Err(e) => {
                    debug!(error = %e, "Capture reader exiting on read error");
                    break;
                }
            }
        }
    })
}

#[async_trait]
impl CommandRunnerPort for SystemCommandRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        cancel: &CancellationToken,
    ) -> Result<CommandRun, CommandError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // No console window flashes on Windows hosts.
        #[cfg(windows)]
        cmd.creation_flags(0x0800_0000); // CREATE_NO_WINDOW

        let mut child = cmd.spawn().map_err(|e| CommandError::SpawnFailed {
            program: spec.program.clone(),
            reason: e.to_string(),
        })?;

        let stdout_buf = Arc::new(Mutex::new(String::new()));
        let stderr_buf = Arc::new(Mutex::new(String::new()));

        let stdout_task = child
            .stdout
            .take()
            .map(|s| spawn_capture_reader(s, stdout_buf.clone()));
        let stderr_task = child
            .stderr
            .take()
            .map(|s| spawn_capture_reader(s, stderr_buf.clone()));

        debug!(command = %spec.display_line(), "Running command");

        // The wait future borrows the child mutably; it must be dropped
        // before the cancelled arm can kill.
        let waited = cancel.run_until_cancelled(child.wait()).await;

        let status = match waited {
            Some(Ok(status)) => {
                // Readers finish at pipe EOF; wait for the tail of the output.
                if let Some(task) = stdout_task {
                    let _ = task.await;
                }
                if let Some(task) = stderr_task {
                    let _ = task.await;
                }
                CommandStatus::Exited(status.code().unwrap_or(-1))
            }
            Some(Err(e)) => {
                warn!(command = %spec.program, error = %e, "Wait on child process failed");
                CommandStatus::Exited(-1)
            }
            None => {
                // Cancellation fired mid-wait. Take the child down rather
                // than leaving a detached process running past shutdown.
                if let Err(e) = child.start_kill() {
                    debug!(command = %spec.program, error = %e, "Kill after cancellation failed");
                }
                if let Some(task) = stdout_task {
                    task.abort();
                }
                if let Some(task) = stderr_task {
                    task.abort();
                }
                debug!(command = %spec.display_line(), "Command wait cancelled");
                CommandStatus::Cancelled
            }
        };

        let stdout = stdout_buf.lock().await.clone();
        let stderr = stderr_buf.lock().await.clone();
        Ok(CommandRun {
            status,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn runner() -> SystemCommandRunner {
        SystemCommandRunner::new()
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn captures_both_streams_on_clean_exit() {
        let spec = CommandSpec::new("sh").args(["-c", "echo out; echo err 1>&2"]);

        let run = runner()
            .run(&spec, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(run.status, CommandStatus::Exited(0));
        assert!(run.status.is_success());
        assert!(run.stdout.contains("out"));
        assert!(run.stderr.contains("err"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn reports_nonzero_exit_codes() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 3"]);

        let run = runner()
            .run(&spec, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(run.status, CommandStatus::Exited(3));
        assert!(!run.status.is_success());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn cancellation_returns_promptly() {
        let spec = CommandSpec::new("sleep").arg("30");
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let run = runner().run(&spec, &cancel).await.unwrap();
        assert_eq!(run.status, CommandStatus::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let spec = CommandSpec::new("boardlink-no-such-program");

        let err = runner()
            .run(&spec, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::SpawnFailed { .. }));
    }
}
