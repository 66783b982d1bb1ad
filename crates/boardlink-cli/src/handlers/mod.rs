//! Command handlers.
//!
//! One module per subcommand. Handlers receive the composed context and
//! drive the core through the host protocol, exactly as a UI widget
//! adapter would.

pub mod devices;
pub mod target;
pub mod templates;
