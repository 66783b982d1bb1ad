//! Target selection service - keeps the persisted device target
//! consistent with the live device list.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::guard::DeployGuard;
use crate::ports::{DeviceEnumeratorPort, EnumerationError, SelectionStorePort, StoreError};
use crate::selection::{NO_DEVICES_SENTINEL, TargetSettings};

/// Errors surfaced by the selection protocol operations.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The candidate is neither in the current device list nor the
    /// sentinel. Stale list, a race with disconnection, or bad input.
    #[error("'{0}' is not a connected device")]
    InvalidSelection(String),

    /// The enumerator could not produce a device list.
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    /// The store failed while persisting a selection.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The value-source contract a host widget drives.
///
/// A combo-box style host issues two queries and one command. The device
/// list can change between any two calls, so implementations re-validate
/// the persisted choice on every read.
#[async_trait]
pub trait TargetValueSource: Send + Sync {
    /// The value to display as currently selected.
    ///
    /// `None` means the call was suppressed (deploy in progress).
    /// `Some("")` means no valid selection exists and the host should
    /// re-prompt; it is deliberately not an error.
    async fn current_value(&self) -> Result<Option<String>, SelectionError>;

    /// The candidate values to offer.
    async fn list_values(&self) -> Result<Vec<String>, SelectionError>;

    /// Accept `candidate` as the new selection.
    async fn set_value(&self, candidate: &str) -> Result<(), SelectionError>;
}

/// Service implementing the device-target selection protocol over the
/// enumerator and store ports.
pub struct TargetSelectionService {
    enumerator: Arc<dyn DeviceEnumeratorPort>,
    store: Arc<dyn SelectionStorePort>,
    guard: DeployGuard,
    /// Last-chosen device name, read from the store at most once.
    cached: Mutex<Option<String>>,
}

impl TargetSelectionService {
    /// Create a new selection service.
    pub fn new(
        enumerator: Arc<dyn DeviceEnumeratorPort>,
        store: Arc<dyn SelectionStorePort>,
        guard: DeployGuard,
    ) -> Self {
        Self {
            enumerator,
            store,
            guard,
            cached: Mutex::new(None),
        }
    }

    /// Read the persisted selection, loading it on first access.
    async fn selected_name(&self) -> Result<String, SelectionError> {
        let mut cached = self.cached.lock().await;
        if let Some(name) = cached.as_ref() {
            return Ok(name.clone());
        }
        let settings = self.store.load().await?;
        debug!(device = %settings.device_name, "Loaded persisted device target");
        let name = settings.device_name;
        *cached = Some(name.clone());
        Ok(name)
    }

    /// Persist `name` and refresh the in-memory copy.
    async fn remember(&self, name: &str) -> Result<(), SelectionError> {
        let mut cached = self.cached.lock().await;
        self.store.save(&TargetSettings::with_device(name)).await?;
        *cached = Some(name.to_string());
        Ok(())
    }
}

#[async_trait]
impl TargetValueSource for TargetSelectionService {
    async fn current_value(&self) -> Result<Option<String>, SelectionError> {
        if self.guard.is_active() {
            return Ok(None);
        }
        let devices = self.enumerator.list_devices().await?;
        if devices.is_empty() {
            return Ok(Some(NO_DEVICES_SENTINEL.to_string()));
        }
        let selected = self.selected_name().await?;
        if !selected.is_empty() && devices.iter().any(|d| d.eq_ignore_ascii_case(&selected)) {
            // The stored casing wins over whatever the enumerator reports.
            return Ok(Some(selected));
        }
        // A persisted name that is no longer connected is not an error;
        // the host re-prompts on an empty value.
        Ok(Some(String::new()))
    }

    async fn list_values(&self) -> Result<Vec<String>, SelectionError> {
        if self.guard.is_active() {
            return Ok(Vec::new());
        }
        let devices = self.enumerator.list_devices().await?;
        if devices.is_empty() {
            return Ok(vec![NO_DEVICES_SENTINEL.to_string()]);
        }
        Ok(devices)
    }

    async fn set_value(&self, candidate: &str) -> Result<(), SelectionError> {
        if self.guard.is_active() {
            return Ok(());
        }
        let devices = self.enumerator.list_devices().await?;
        if devices.iter().any(|d| d.eq_ignore_ascii_case(candidate)) {
            self.remember(candidate).await?;
            debug!(device = %candidate, "Device target updated");
            return Ok(());
        }
        if candidate == NO_DEVICES_SENTINEL {
            // The host echoing the placeholder back acknowledges that
            // there is nothing to select; it is not a selection.
            return Ok(());
        }
        warn!(candidate = %candidate, "Rejected device target not in the current list");
        Err(SelectionError::InvalidSelection(candidate.to_string()))
    }
}
