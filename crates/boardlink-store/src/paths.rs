//! Per-user storage locations for boardlink data.

use std::env;
use std::fs;
use std::path::PathBuf;

use boardlink_core::ports::StoreError;

/// Get the root directory for boardlink data.
///
/// Resolution order:
/// 1. `BOARDLINK_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g. `~/.local/share/boardlink`)
///
/// The directory is created on demand.
pub fn data_root() -> Result<PathBuf, StoreError> {
    if let Ok(path) = env::var("BOARDLINK_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| StoreError::Storage("cannot determine system data directory".to_string()))?;

    let root = data_dir.join("boardlink");
    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::Storage(format!("failed to create {}: {e}", root.display()))
        })?;
    }

    Ok(root)
}

/// Well-known location of the persisted device-target record.
pub fn settings_path() -> Result<PathBuf, StoreError> {
    Ok(data_root()?.join("target.json"))
}
