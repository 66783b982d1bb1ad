//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use boardlink_core::{ProtocolError, SelectionError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or selection error (invalid input).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (store read/write, file permissions, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The device transport could not be queried.
    #[error("Device error: {0}")]
    Device(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific categories (see sysexits.h)
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::Io(_) => 74,        // EX_IOERR
            Self::Device(_) => 69,    // EX_UNAVAILABLE
            Self::Config(_) => 78,    // EX_CONFIG
        }
    }
}

impl From<SelectionError> for CliError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::InvalidSelection(_) => Self::Arguments(err.to_string()),
            SelectionError::Enumeration(e) => Self::Device(e.to_string()),
            SelectionError::Store(e) => Self::Io(e.to_string()),
        }
    }
}

impl From<ProtocolError> for CliError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Selection(e) => e.into(),
            other => Self::Arguments(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardlink_core::EnumerationError;

    #[test]
    fn invalid_selection_maps_to_usage_error() {
        let err: CliError = SelectionError::InvalidSelection("COM9".to_string()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn enumeration_failure_maps_to_unavailable() {
        let err: CliError =
            SelectionError::Enumeration(EnumerationError::Unavailable("down".to_string())).into();
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn protocol_violations_map_to_usage_errors() {
        let err: CliError = ProtocolError::MissingPayload.into();
        assert_eq!(err.exit_code(), 2);
    }
}
