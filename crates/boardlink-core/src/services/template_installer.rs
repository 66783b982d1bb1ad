//! Background bootstrap of the project-template package.
//!
//! The host needs the toolchain's project templates installed before a
//! new project can be created. This service decides *whether* to run the
//! install (network reachability) and *what* to run, and delegates the
//! actual process launch to the command runner port.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::{CommandRun, CommandRunnerPort, CommandSpec, NetworkProbePort};

/// Package-management executable used to install project templates.
pub const PACKAGE_TOOL: &str = "dotnet";

/// Template package the host requires.
pub const TEMPLATE_PACKAGE: &str = "Boardlink.ProjectTemplates";

const PHASE_IDLE: u8 = 0;
const PHASE_INSTALLING: u8 = 1;
const PHASE_DONE: u8 = 2;

/// Where an install attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    /// No attempt has started yet.
    Idle,
    /// An attempt is in flight.
    Installing,
    /// The one attempt has finished, whatever the outcome.
    Done,
}

/// Classification of one bootstrap attempt.
#[derive(Debug, Clone)]
pub enum InstallOutcome {
    /// Nothing was attempted: offline, or an attempt already ran.
    Skipped,
    /// The tool exited with code 0.
    Succeeded(CommandRun),
    /// The tool exited non-zero, was cancelled, or never launched
    /// (`None` when there is no run to report).
    Failed(Option<CommandRun>),
}

/// Policy layer over the command runner for the template install.
///
/// Single-shot: only the first `install` call leaves `Idle`. Failures
/// are classified and logged here, never propagated; the host startup
/// path must not be able to observe them.
pub struct TemplateInstaller {
    probe: Arc<dyn NetworkProbePort>,
    runner: Arc<dyn CommandRunnerPort>,
    phase: AtomicU8,
}

impl TemplateInstaller {
    /// Create an installer in the `Idle` phase.
    pub fn new(probe: Arc<dyn NetworkProbePort>, runner: Arc<dyn CommandRunnerPort>) -> Self {
        Self {
            probe,
            runner,
            phase: AtomicU8::new(PHASE_IDLE),
        }
    }

    /// The exact invocation used to install the template package.
    #[must_use]
    pub fn install_command() -> CommandSpec {
        CommandSpec::new(PACKAGE_TOOL).args(["new", "install", TEMPLATE_PACKAGE])
    }

    /// The current phase of the state machine.
    pub fn phase(&self) -> InstallPhase {
        match self.phase.load(Ordering::SeqCst) {
            PHASE_INSTALLING => InstallPhase::Installing,
            PHASE_DONE => InstallPhase::Done,
            _ => InstallPhase::Idle,
        }
    }

    /// Run one install attempt.
    ///
    /// Offline hosts skip without launching anything. A repeated call
    /// observes a non-idle phase and also skips; there are no retries.
    pub async fn install(&self, cancel: &CancellationToken) -> InstallOutcome {
        if self
            .phase
            .compare_exchange(PHASE_IDLE, PHASE_INSTALLING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Template install already attempted; skipping");
            return InstallOutcome::Skipped;
        }

        let outcome = self.run_install(cancel).await;
        self.phase.store(PHASE_DONE, Ordering::SeqCst);

        match &outcome {
            InstallOutcome::Skipped => {}
            InstallOutcome::Succeeded(_) => {
                info!(package = TEMPLATE_PACKAGE, "Project templates installed");
            }
            InstallOutcome::Failed(run) => {
                let detail = run
                    .as_ref()
                    .map_or_else(|| "did not launch".to_string(), |r| format!("{:?}", r.status));
                warn!(package = TEMPLATE_PACKAGE, %detail, "Project template install failed");
            }
        }
        outcome
    }

    async fn run_install(&self, cancel: &CancellationToken) -> InstallOutcome {
        if !self.probe.is_online().await {
            info!("Network unreachable; skipping template install");
            return InstallOutcome::Skipped;
        }

        let spec = Self::install_command();
        debug!(command = %spec.display_line(), "Installing project templates");

        match self.runner.run(&spec, cancel).await {
            Ok(run) if run.status.is_success() => InstallOutcome::Succeeded(run),
            Ok(run) => InstallOutcome::Failed(Some(run)),
            Err(e) => {
                warn!(error = %e, "Template install could not launch");
                InstallOutcome::Failed(None)
            }
        }
    }
}

/// Kick the install off on its own task, fire-and-forget.
///
/// The outcome is logged inside `install`; the task boundary discards it
/// so nothing can propagate into the caller's startup path.
pub fn spawn_background(
    installer: Arc<TemplateInstaller>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _outcome = installer.install(&cancel).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CommandError, CommandStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    struct MockProbe {
        online: bool,
        calls: AtomicUsize,
    }

    impl MockProbe {
        fn new(online: bool) -> Arc<Self> {
            Arc::new(Self {
                online,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NetworkProbePort for MockProbe {
        async fn is_online(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.online
        }
    }

    struct MockRunner {
        result: Mutex<Result<CommandRun, CommandError>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<CommandSpec>>,
    }

    impl MockRunner {
        fn exiting(code: i32) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Ok(CommandRun {
                    status: CommandStatus::Exited(code),
                    stdout: "installed".to_string(),
                    stderr: String::new(),
                })),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing_to_spawn() -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Err(CommandError::SpawnFailed {
                    program: PACKAGE_TOOL.to_string(),
                    reason: "not found".to_string(),
                })),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommandRunnerPort for MockRunner {
        async fn run(
            &self,
            spec: &CommandSpec,
            _cancel: &CancellationToken,
        ) -> Result<CommandRun, CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(spec.clone());
            match &*self.result.lock().unwrap() {
                Ok(run) => Ok(run.clone()),
                Err(CommandError::SpawnFailed { program, reason }) => {
                    Err(CommandError::SpawnFailed {
                        program: program.clone(),
                        reason: reason.clone(),
                    })
                }
            }
        }
    }

    #[tokio::test]
    async fn offline_skips_without_launching() {
        let probe = MockProbe::new(false);
        let runner = MockRunner::exiting(0);
        let installer = TemplateInstaller::new(probe, runner.clone());

        let outcome = installer.install(&CancellationToken::new()).await;
        assert!(matches!(outcome, InstallOutcome::Skipped));
        assert_eq!(runner.call_count(), 0);
        assert_eq!(installer.phase(), InstallPhase::Done);
    }

    #[tokio::test]
    async fn exit_zero_classifies_as_succeeded() {
        let installer = TemplateInstaller::new(MockProbe::new(true), MockRunner::exiting(0));

        let outcome = installer.install(&CancellationToken::new()).await;
        match outcome {
            InstallOutcome::Succeeded(run) => assert_eq!(run.stdout, "installed"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_classifies_as_failed() {
        let installer = TemplateInstaller::new(MockProbe::new(true), MockRunner::exiting(1));

        let outcome = installer.install(&CancellationToken::new()).await;
        match outcome {
            InstallOutcome::Failed(Some(run)) => {
                assert_eq!(run.status, CommandStatus::Exited(1));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn launch_failure_classifies_as_failed_without_a_run() {
        let installer =
            TemplateInstaller::new(MockProbe::new(true), MockRunner::failing_to_spawn());

        let outcome = installer.install(&CancellationToken::new()).await;
        assert!(matches!(outcome, InstallOutcome::Failed(None)));
    }

    #[tokio::test]
    async fn second_attempt_is_skipped() {
        let runner = MockRunner::exiting(0);
        let installer = TemplateInstaller::new(MockProbe::new(true), runner.clone());
        let cancel = CancellationToken::new();

        assert!(matches!(
            installer.install(&cancel).await,
            InstallOutcome::Succeeded(_)
        ));
        assert!(matches!(
            installer.install(&cancel).await,
            InstallOutcome::Skipped
        ));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn install_command_targets_the_template_package() {
        let runner = MockRunner::exiting(0);
        let installer = TemplateInstaller::new(MockProbe::new(true), runner.clone());
        installer.install(&CancellationToken::new()).await;

        let seen = runner.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].program, PACKAGE_TOOL);
        assert_eq!(seen[0].args, vec!["new", "install", TEMPLATE_PACKAGE]);
    }

    #[tokio::test]
    async fn background_spawn_contains_the_outcome() {
        let installer = Arc::new(TemplateInstaller::new(
            MockProbe::new(true),
            MockRunner::failing_to_spawn(),
        ));

        let handle = spawn_background(installer.clone(), CancellationToken::new());
        handle.await.unwrap();
        assert_eq!(installer.phase(), InstallPhase::Done);
    }

    #[test]
    fn phase_starts_idle() {
        let installer =
            TemplateInstaller::new(MockProbe::new(true), MockRunner::exiting(0));
        assert_eq!(installer.phase(), InstallPhase::Idle);
    }
}
