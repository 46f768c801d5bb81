//! Management-session boundary.
//!
//! A [`SessionProvider`] turns a host name into a live [`ManagementSession`];
//! a session answers read-only attribute queries scoped to one of five fixed
//! categories. Transport and authentication live entirely behind these traits.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, SessionError};

/// The five attribute categories a session can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryCategory {
    SystemSummary,
    OsSummary,
    LogicalDisk,
    Bios,
    Processor,
}

impl QueryCategory {
    /// All categories, in collection order.
    pub const ALL: [Self; 5] = [
        Self::SystemSummary,
        Self::OsSummary,
        Self::LogicalDisk,
        Self::Bios,
        Self::Processor,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SystemSummary => "SystemSummary",
            Self::OsSummary => "OsSummary",
            Self::LogicalDisk => "LogicalDisk",
            Self::Bios => "Bios",
            Self::Processor => "Processor",
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality predicate on a single attribute.
///
/// The only filtered category is [`QueryCategory::LogicalDisk`], keyed by the
/// device id reported in the OS summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqFilter {
    pub attribute: String,
    pub value: String,
}

impl EqFilter {
    #[must_use]
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// True when `bag` carries the filtered attribute with the expected value.
    #[must_use]
    pub fn matches(&self, bag: &AttributeBag) -> bool {
        bag.get_str(&self.attribute) == Some(self.value.as_str())
    }
}

/// One query instance: an ordered, loosely-typed attribute map.
///
/// Management transports are sloppy about numeric types; the same attribute
/// may arrive as a JSON number or as a decimal string, so the getters coerce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(BTreeMap<String, serde_json::Value>);

impl AttributeBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    /// Unsigned integer attribute, accepting numbers and decimal strings.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.0.get(key)? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_u64(key).and_then(|v| u32::try_from(v).ok())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A live session bound to a single host.
#[async_trait]
pub trait ManagementSession: Send + Sync {
    /// Host name this session was opened against.
    fn host(&self) -> &str;

    /// Issue one read-only query.
    ///
    /// Returns every matching instance; an empty vec means "no instance",
    /// which is not an error.
    ///
    /// # Errors
    /// [`QueryError`] on transport-level failure (unreachable, auth, timeout).
    async fn query(
        &self,
        category: QueryCategory,
        filter: Option<&EqFilter>,
    ) -> Result<Vec<AttributeBag>, QueryError>;

    /// Release the session. Idempotent.
    ///
    /// # Errors
    /// [`SessionError::Close`] when teardown fails; the session must still be
    /// considered released afterwards.
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// Opens management sessions by host name.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// # Errors
    /// [`SessionError`] when no session can be established.
    async fn open(&self, host: &str) -> Result<Box<dyn ManagementSession>, SessionError>;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn bag_coerces_numbers_and_decimal_strings() {
        let bag = AttributeBag::new()
            .with("Size", 107_374_182_400_u64)
            .with("FreeSpace", "26843545600")
            .with("Name", "HOST-1");

        assert_eq!(bag.get_u64("Size"), Some(107_374_182_400));
        assert_eq!(bag.get_u64("FreeSpace"), Some(26_843_545_600));
        assert_eq!(bag.get_str("Name"), Some("HOST-1"));
    }

    #[test]
    fn bag_rejects_non_numeric_values() {
        let bag = AttributeBag::new()
            .with("Size", "not a number")
            .with("Flag", true);

        assert_eq!(bag.get_u64("Size"), None);
        assert_eq!(bag.get_u64("Flag"), None);
        assert_eq!(bag.get_u64("Missing"), None);
    }

    #[test]
    fn filter_matches_on_exact_attribute_value() {
        let filter = EqFilter::new("DeviceID", "C:");
        assert!(filter.matches(&AttributeBag::new().with("DeviceID", "C:")));
        assert!(!filter.matches(&AttributeBag::new().with("DeviceID", "D:")));
        assert!(!filter.matches(&AttributeBag::new()));
    }
}
