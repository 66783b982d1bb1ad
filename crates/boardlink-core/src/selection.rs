//! Selection domain types.
//!
//! These are pure domain types with no infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder offered in place of a device name when enumeration finds
/// nothing. It is a valid input back to the selection protocol (a no-op
/// acknowledgment) but is never persisted as a selection.
pub const NO_DEVICES_SENTINEL: &str = "No Devices Found";

/// The persisted device-target record.
///
/// A single string field round-trips through storage; an empty
/// `device_name` means nothing was ever selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetSettings {
    /// Last device name the user chose, in the casing they chose it.
    pub device_name: String,

    /// When the selection was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TargetSettings {
    /// Create a record for a freshly chosen device, stamped now.
    pub fn with_device(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Whether any selection has ever been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device_name.is_empty()
    }
}
