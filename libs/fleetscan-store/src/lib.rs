#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Relational persistence for inventory records.
//!
//! One [`Store`] wraps one shared database connection for a whole batch.
//! Persisting a record is a delete of any existing row with the same
//! (`ComputerName`, `Drive`) key followed by an insert of the new row; both
//! statements carry their values as bound parameters. The delete+insert pair
//! is deliberately not transactional by default (a failed delete still lets
//! the insert run); set `transactional` in [`StoreConfig`] to wrap the pair
//! in one transaction.

pub mod config;
pub mod entity;
pub mod error;
pub mod migrations;
pub mod writer;

pub use config::{StoreConfig, TableRef};
pub use error::{PersistenceError, StatementKind, StoreError};
pub use migrations::Migrator;
pub use writer::{Store, UpsertOutcome};
