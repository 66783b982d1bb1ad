//! Process-wide deploy guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag raised by the build/deploy collaborator while an operation
/// is in flight.
///
/// The selection service only ever reads it; while it is active all three
/// protocol operations become no-ops so device-list churn cannot
/// interfere with an active deployment. Clones share the same underlying
/// flag, so one handle can be threaded into every collaborator instead of
/// a global static.
#[derive(Debug, Clone, Default)]
pub struct DeployGuard {
    active: Arc<AtomicBool>,
}

impl DeployGuard {
    /// Create an inactive guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a build/deploy operation as in progress.
    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    /// Mark the operation as finished.
    pub fn release(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether an operation is currently in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
