//! Errors for inventory collection.

use crate::session::QueryCategory;

/// Session acquisition or teardown failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("host '{host}' unreachable: {reason}")]
    Unreachable { host: String, reason: String },

    #[error("authentication to host '{host}' failed: {reason}")]
    AuthFailed { host: String, reason: String },

    #[error("session to host '{host}' closed uncleanly: {reason}")]
    Close { host: String, reason: String },
}

impl SessionError {
    pub fn unreachable(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreachable {
            host: host.into(),
            reason: reason.into(),
        }
    }
}

/// Transport-level failure of a single query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("query timed out")]
    Timeout,

    #[error("access denied: {0}")]
    AccessDenied(String),
}

/// A query category failed for a host.
///
/// Raised by the collector only when the failed category is load-bearing
/// (the system summary); other categories degrade to per-category failures
/// inside [`crate::RawFacts`].
#[derive(Debug, thiserror::Error)]
#[error("query '{category}' failed for host '{host}': {cause}")]
pub struct CollectionError {
    pub host: String,
    pub category: QueryCategory,
    #[source]
    pub cause: QueryError,
}

/// Why a host produced no record.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("host '{host}' returned no computer name")]
    MissingIdentity { host: String },
}
