//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types in their signatures.
//!
//! # Design Rules
//!
//! - No process/filesystem implementation details in any signature
//! - Traits are minimal and intent-based
//! - Each port carries its own error type

pub mod command_runner;
pub mod device_enumerator;
pub mod network_probe;
pub mod selection_store;

pub use command_runner::{
    CommandError, CommandRun, CommandRunnerPort, CommandSpec, CommandStatus,
};
pub use device_enumerator::{DeviceEnumeratorPort, EnumerationError};
pub use network_probe::NetworkProbePort;
pub use selection_store::{SelectionStorePort, StoreError};
