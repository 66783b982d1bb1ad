//! Selection store trait definition.
//!
//! This port defines the interface for persisting the device-target
//! record. Implementations handle all storage details internally.

use async_trait::async_trait;
use thiserror::Error;

use crate::selection::TargetSettings;

/// Domain-specific errors for store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Storage backend error (filesystem, database, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository for the persisted device-target record.
///
/// # Design Rules
///
/// - Works with the domain `TargetSettings` type directly
/// - The implementation handles serialization and location internally
/// - `load` returns defaults when nothing has been stored yet
#[async_trait]
pub trait SelectionStorePort: Send + Sync {
    /// Load the persisted record.
    async fn load(&self) -> Result<TargetSettings, StoreError>;

    /// Overwrite the stored record as a whole. There is no partial update.
    async fn save(&self, settings: &TargetSettings) -> Result<(), StoreError>;
}
