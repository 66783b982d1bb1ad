//! Core domain types, ports, and services for boardlink.
//!
//! boardlink keeps a single "current device target" synchronized for an
//! embedded-board deploy toolchain and bootstraps the toolchain's
//! project-template package in the background. This crate is the pure
//! center of the workspace: domain types, the port traits infrastructure
//! must implement, the selection and installer services, and the host
//! protocol contract. Adapters (storage, process, CLI) live in sibling
//! crates.

pub mod guard;
pub mod ports;
pub mod protocol;
pub mod selection;
pub mod services;

// Re-export commonly used types for convenience
pub use guard::DeployGuard;
pub use ports::{
    CommandError, CommandRun, CommandRunnerPort, CommandSpec, CommandStatus, DeviceEnumeratorPort,
    EnumerationError, NetworkProbePort, SelectionStorePort, StoreError,
};
pub use protocol::{ProtocolError, RequestKind, TargetRequest, TargetResponse, dispatch};
pub use selection::{NO_DEVICES_SENTINEL, TargetSettings};
pub use services::{
    InstallOutcome, InstallPhase, PACKAGE_TOOL, SelectionError, TEMPLATE_PACKAGE,
    TargetSelectionService, TargetValueSource, TemplateInstaller, spawn_background,
};

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
