//! File-backed selection store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use boardlink_core::ports::{SelectionStorePort, StoreError};
use boardlink_core::selection::TargetSettings;

use crate::paths::settings_path;

/// JSON-on-disk implementation of the selection store.
///
/// The whole record is rewritten on every save; there is no merge. A
/// missing or unreadable file reads as the empty-selection default
/// rather than an error, so a damaged record degrades to "nothing
/// selected" instead of wedging the host.
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known per-user location.
    pub fn at_default_location() -> Result<Self, StoreError> {
        Ok(Self::new(settings_path()?))
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SelectionStorePort for FileSelectionStore {
    async fn load(&self) -> Result<TargetSettings, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted device target yet");
                return Ok(TargetSettings::default());
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Unreadable device-target record; using defaults"
                );
                return Ok(TargetSettings::default());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt device-target record; using defaults"
                );
                Ok(TargetSettings::default())
            }
        }
    }

    async fn save(&self, settings: &TargetSettings) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            StoreError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(
            path = %self.path.display(),
            device = %settings.device_name,
            "Device target persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_loads_as_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("target.json"));

        let settings = store.load().await.unwrap();
        assert!(settings.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("target.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSelectionStore::new(path);
        let settings = store.load().await.unwrap();
        assert!(settings.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("target.json"));

        let original = TargetSettings::with_device("/dev/ttyACM0");
        store.save(&original).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.device_name, "/dev/ttyACM0");
        assert_eq!(loaded.updated_at, original.updated_at);
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("target.json");
        let store = FileSelectionStore::new(&path);

        store.save(&TargetSettings::with_device("COM7")).await.unwrap();
        assert!(path.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.device_name, "COM7");
    }

    #[tokio::test]
    async fn save_overwrites_fully() {
        let dir = tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("target.json"));

        store.save(&TargetSettings::with_device("COM3")).await.unwrap();
        store.save(&TargetSettings::with_device("COM5")).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.device_name, "COM5");
    }
}
