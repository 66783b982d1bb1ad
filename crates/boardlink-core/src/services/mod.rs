//! Core services orchestrating the ports.

pub mod target_selection;
pub mod template_installer;

pub use target_selection::{SelectionError, TargetSelectionService, TargetValueSource};
pub use template_installer::{
    InstallOutcome, InstallPhase, PACKAGE_TOOL, TEMPLATE_PACKAGE, TemplateInstaller,
    spawn_background,
};
