//! Inventory pipeline: session lifecycle, collection, and normalization
//! across a list of hosts.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::collector;
use crate::error::{CollectionError, HostError};
use crate::model::MachineInfo;
use crate::normalize::normalize;
use crate::session::SessionProvider;

/// What to do with a host where some non-identity query categories failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialPolicy {
    /// Keep the host; failed categories null-fill their record fields.
    #[default]
    NullFill,
    /// Drop the host on any category failure.
    DropHost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub partial_policy: PartialPolicy,
    /// Bounded fan-out across hosts; 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            partial_policy: PartialPolicy::default(),
            concurrency: 1,
        }
    }
}

/// Outcome for one host, in input order.
#[derive(Debug)]
pub struct HostReport {
    pub host: String,
    pub outcome: Result<MachineInfo, HostError>,
}

/// Drives session open → collect → normalize → close for each host.
///
/// Structural guarantee: a session never outlives its host's report — it is
/// closed before the report is yielded, on success and on failure alike.
pub struct InventoryPipeline {
    provider: Arc<dyn SessionProvider>,
    options: PipelineOptions,
}

impl InventoryPipeline {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self::with_options(provider, PipelineOptions::default())
    }

    #[must_use]
    pub fn with_options(provider: Arc<dyn SessionProvider>, options: PipelineOptions) -> Self {
        Self { provider, options }
    }

    /// One [`HostReport`] per host, in input order.
    ///
    /// With `concurrency > 1` up to that many hosts are in flight at once;
    /// `buffered` keeps the output ordered either way, and each in-flight
    /// host still owns exactly one session for exactly its own duration.
    pub fn collect_stream<'a>(
        &'a self,
        hosts: &'a [String],
    ) -> impl Stream<Item = HostReport> + 'a {
        stream::iter(hosts)
            .map(move |host| self.collect_host(host))
            .buffered(self.options.concurrency.max(1))
    }

    /// Eager variant of [`Self::collect_stream`].
    pub async fn collect_all(&self, hosts: &[String]) -> Vec<HostReport> {
        self.collect_stream(hosts).collect().await
    }

    async fn collect_host(&self, host: &str) -> HostReport {
        let outcome = self.try_collect_host(host).await;
        if let Err(error) = &outcome {
            tracing::warn!(host, %error, "host skipped");
        }
        HostReport {
            host: host.to_owned(),
            outcome,
        }
    }

    async fn try_collect_host(&self, host: &str) -> Result<MachineInfo, HostError> {
        let mut session = self.provider.open(host).await?;
        let collected = collector::collect(session.as_ref(), host).await;

        // Close before inspecting the collection result: the session must not
        // outlive this host regardless of how collection went.
        if let Err(error) = session.close().await {
            tracing::warn!(host, %error, "session close failed");
        }

        let facts = collected?;

        if self.options.partial_policy == PartialPolicy::DropHost {
            if let Some(failure) = facts.failures.first() {
                return Err(CollectionError {
                    host: host.to_owned(),
                    category: failure.category,
                    cause: failure.cause.clone(),
                }
                .into());
            }
        }

        let record = normalize(&facts);
        if record.computer_name.is_empty() {
            return Err(HostError::MissingIdentity {
                host: host.to_owned(),
            });
        }
        Ok(record)
    }
}
