//! Device enumerator trait definition.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a device enumeration call.
#[derive(Debug, Clone, Error)]
pub enum EnumerationError {
    /// The underlying transport could not produce a device list.
    #[error("Device enumeration unavailable: {0}")]
    Unavailable(String),
}

/// Source of the currently connected device names.
///
/// One call produces one snapshot; an empty list is a common, valid
/// result. The source makes no ordering or uniqueness guarantees and
/// nothing is cached between calls, so consumers must re-validate any
/// name they held onto.
#[async_trait]
pub trait DeviceEnumeratorPort: Send + Sync {
    /// List the device names currently visible to the transport.
    async fn list_devices(&self) -> Result<Vec<String>, EnumerationError>;
}
