//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated
//! here: the file store, the serial enumerator, the command runner, the
//! network probe, and the core services composed over them. Command
//! handlers receive the fully-composed context and delegate to it.

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use boardlink_core::{DeployGuard, TargetSelectionService, TemplateInstaller};
use boardlink_runtime::{HttpNetworkProbe, SerialDeviceEnumerator, SystemCommandRunner};
use boardlink_store::FileSelectionStore;

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The device-target selection protocol implementation.
    pub selection: Arc<TargetSelectionService>,
    /// The project-template installer.
    pub installer: Arc<TemplateInstaller>,
    /// Guard a deploy collaborator raises while a build/deploy runs.
    pub guard: DeployGuard,
    /// Cancellation tied to host shutdown; cancel to stop waiting on
    /// any in-flight background work.
    pub shutdown: CancellationToken,
}

/// Bootstrap the CLI application.
pub fn bootstrap() -> Result<CliContext> {
    let store = Arc::new(FileSelectionStore::at_default_location()?);
    let enumerator = Arc::new(SerialDeviceEnumerator::new());
    let guard = DeployGuard::new();
    let selection = Arc::new(TargetSelectionService::new(
        enumerator,
        store,
        guard.clone(),
    ));

    let probe = Arc::new(HttpNetworkProbe::new());
    let runner = Arc::new(SystemCommandRunner::new());
    let installer = Arc::new(TemplateInstaller::new(probe, runner));

    Ok(CliContext {
        selection,
        installer,
        guard,
        shutdown: CancellationToken::new(),
    })
}
