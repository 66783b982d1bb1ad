//! Serial device enumeration.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use boardlink_core::ports::{DeviceEnumeratorPort, EnumerationError};

/// Name prefixes that identify serial-capable device nodes.
const SERIAL_PREFIXES: &[&str] = &["ttyUSB", "ttyACM", "ttyAMA", "cu.usbmodem", "cu.usbserial"];

/// Enumerates serial-capable devices by scanning the device tree.
///
/// Each call is a fresh scan; nothing is cached between calls. The scan
/// root is injectable so tests can point it at a synthetic tree.
pub struct SerialDeviceEnumerator {
    root: PathBuf,
}

impl SerialDeviceEnumerator {
    /// Scan the platform device tree (`/dev`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("/dev")
    }

    /// Scan an explicit directory instead.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for SerialDeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

fn scan(root: &Path) -> Result<Vec<String>, EnumerationError> {
    if cfg!(windows) {
        // Device nodes are not exposed through the filesystem there.
        debug!("Serial scan unsupported on this platform; reporting no devices");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(root).map_err(|e| {
        EnumerationError::Unavailable(format!("cannot read {}: {e}", root.display()))
    })?;

    let mut devices: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            SERIAL_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix))
                .then(|| entry.path().display().to_string())
        })
        .collect();
    devices.sort();
    Ok(devices)
}

#[async_trait]
impl DeviceEnumeratorPort for SerialDeviceEnumerator {
    async fn list_devices(&self) -> Result<Vec<String>, EnumerationError> {
        let root = self.root.clone();
        let devices = tokio::task::spawn_blocking(move || scan(&root))
            .await
            .map_err(|e| EnumerationError::Unavailable(format!("scan task failed: {e}")))??;

        debug!(count = devices.len(), "Enumerated serial devices");
        Ok(devices)
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn picks_up_only_serial_like_names_sorted() {
        let dir = tempdir().unwrap();
        for name in ["ttyUSB1", "ttyUSB0", "ttyACM0", "sda", "null", "random"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let enumerator = SerialDeviceEnumerator::with_root(dir.path());
        let devices = enumerator.list_devices().await.unwrap();

        let expected: Vec<String> = ["ttyACM0", "ttyUSB0", "ttyUSB1"]
            .iter()
            .map(|n| dir.path().join(n).display().to_string())
            .collect();
        assert_eq!(devices, expected);
    }

    #[tokio::test]
    async fn empty_tree_yields_empty_list() {
        let dir = tempdir().unwrap();
        let enumerator = SerialDeviceEnumerator::with_root(dir.path());
        assert!(enumerator.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_root_is_unavailable() {
        let dir = tempdir().unwrap();
        let enumerator = SerialDeviceEnumerator::with_root(dir.path().join("gone"));

        let err = enumerator.list_devices().await.unwrap_err();
        assert!(matches!(err, EnumerationError::Unavailable(_)));
    }
}
