//! HTTP network reachability probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use boardlink_core::ports::NetworkProbePort;

/// Registry endpoint probed before attempting a template install.
const DEFAULT_PROBE_URL: &str = "https://www.nuget.org";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Reachability probe that issues a HEAD request against the template
/// registry. Any transport error, timeout, or non-success status reads
/// as offline.
pub struct HttpNetworkProbe {
    client: Client,
    url: String,
}

impl HttpNetworkProbe {
    /// Probe against the template registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(DEFAULT_PROBE_URL)
    }

    /// Probe against an explicit endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Default for HttpNetworkProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkProbePort for HttpNetworkProbe {
    async fn is_online(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(url = %self.url, status = %response.status(), "Probe endpoint answered non-success");
                false
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "Network probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_reads_as_offline() {
        // Port 1 is never listening; connection is refused immediately.
        let probe = HttpNetworkProbe::with_url("http://127.0.0.1:1");
        assert!(!probe.is_online().await);
    }
}
