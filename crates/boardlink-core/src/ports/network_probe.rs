//! Network reachability trait definition.

use async_trait::async_trait;

/// Answers whether the network is worth trying right now.
///
/// Probing never errors: anything short of a clear yes is reported as
/// offline, so callers skip work instead of failing it.
#[async_trait]
pub trait NetworkProbePort: Send + Sync {
    /// Whether the host currently has network reachability.
    async fn is_online(&self) -> bool;
}
