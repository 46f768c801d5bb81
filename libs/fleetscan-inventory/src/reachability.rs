//! Reachability filter: admit only hosts that answer a liveness probe.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use tokio::net::TcpStream;

use crate::session::{QueryCategory, SessionProvider};

/// Liveness probe abstraction so tests can inject fakes.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// True when the host answers within the probe's deadline.
    async fn probe(&self, host: &str) -> bool;
}

/// TCP connect probe against the management port.
pub struct TcpProbe {
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    #[must_use]
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl LivenessProbe for TcpProbe {
    async fn probe(&self, host: &str) -> bool {
        let addr = format!("{host}:{}", self.port);
        match tokio::time::timeout(self.timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(error)) => {
                tracing::debug!(host, %error, "liveness probe refused");
                false
            }
            Err(_elapsed) => {
                tracing::debug!(host, timeout = ?self.timeout, "liveness probe timed out");
                false
            }
        }
    }
}

/// Filters a host list down to hosts that answer the liveness probe,
/// preserving input order.
pub struct ReachabilityFilter {
    probe: Arc<dyn LivenessProbe>,
    attribute_provider: Option<Arc<dyn SessionProvider>>,
}

impl ReachabilityFilter {
    #[must_use]
    pub fn new(probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            probe,
            attribute_provider: None,
        }
    }

    /// Additionally issue one best-effort system-summary query per admitted
    /// host. Its failure is swallowed and never excludes the host.
    #[must_use]
    pub fn with_attribute_probe(mut self, provider: Arc<dyn SessionProvider>) -> Self {
        self.attribute_provider = Some(provider);
        self
    }

    pub fn filter<'a>(&'a self, hosts: &'a [String]) -> impl Stream<Item = String> + 'a {
        stream::iter(hosts).filter_map(move |host| async move {
            if !self.probe.probe(host).await {
                tracing::info!(host = %host, "excluded: no liveness response");
                return None;
            }
            if let Some(provider) = &self.attribute_provider {
                attribute_probe(provider.as_ref(), host).await;
            }
            Some(host.clone())
        })
    }
}

/// Best effort only: every failure here is logged and swallowed.
async fn attribute_probe(provider: &dyn SessionProvider, host: &str) {
    match provider.open(host).await {
        Ok(mut session) => {
            if let Err(error) = session.query(QueryCategory::SystemSummary, None).await {
                tracing::debug!(host, %error, "attribute probe query failed");
            }
            if let Err(error) = session.close().await {
                tracing::debug!(host, %error, "attribute probe session close failed");
            }
        }
        Err(error) => {
            tracing::debug!(host, %error, "attribute probe could not open a session");
        }
    }
}
