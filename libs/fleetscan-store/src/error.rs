//! Store errors.

use std::fmt;

/// Errors opening or migrating the store. Connect failure is the one error
/// that aborts a whole persistence run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to '{dsn}': {source}")]
    Connect {
        /// Redacted DSN — never carries credentials.
        dsn: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("migration failed: {0}")]
    Migration(#[source] sea_orm::DbErr),

    #[error("invalid table name '{0}'")]
    InvalidTable(String),
}

/// One failed statement while persisting one record. Never aborts the batch.
#[derive(Debug, thiserror::Error)]
#[error("{statement} for host '{host}' failed: {cause}")]
pub struct PersistenceError {
    pub host: String,
    pub statement: StatementKind,
    #[source]
    pub cause: sea_orm::DbErr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Delete,
    Insert,
    Transaction,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Delete => "DELETE",
            Self::Insert => "INSERT",
            Self::Transaction => "transaction",
        })
    }
}
