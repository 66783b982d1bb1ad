//! Process and OS-level adapters for boardlink.
//!
//! Concrete implementations of the core ports that touch the operating
//! system: launching external commands, probing network reachability,
//! and scanning for connected serial devices.

pub mod command_runner;
pub mod enumerator;
pub mod network_probe;

pub use command_runner::SystemCommandRunner;
pub use enumerator::SerialDeviceEnumerator;
pub use network_probe::HttpNetworkProbe;
