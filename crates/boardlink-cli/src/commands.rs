//! Subcommand definitions.

use clap::Subcommand;

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the connected devices
    Devices,

    /// Show or set the current device target
    Target {
        /// Device name to select; omit to show the current target
        device: Option<String>,
    },

    /// Install the project-template package now and report the outcome
    Bootstrap,
}
