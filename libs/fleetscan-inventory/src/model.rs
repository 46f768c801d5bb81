//! Inventory domain records.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::session::{AttributeBag, QueryCategory};

/// Flat inventory record for one (host, system drive) pair.
///
/// Built once by [`crate::normalize`] and never mutated afterwards. The serde
/// renames pin the 16 wire field names, which double as the column names of
/// the persisted row; (`ComputerName`, `Drive`) is the upsert key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineInfo {
    #[serde(rename = "ComputerName")]
    pub computer_name: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    /// Total physical memory in whole GiB, truncated.
    #[serde(rename = "RAM")]
    pub ram_gb: u64,
    /// Device id of the system drive.
    #[serde(rename = "Drive")]
    pub drive: String,
    #[serde(rename = "DiskSize")]
    pub disk_size_gb: u64,
    #[serde(rename = "FreeSpace")]
    pub free_space_gb: u64,
    /// Truncated percentage; 0 when the disk size is unknown or zero.
    #[serde(rename = "FreePercent")]
    pub free_percent: u32,
    #[serde(rename = "BIOSVersion")]
    pub bios_version: String,
    #[serde(rename = "BIOSSerial")]
    pub bios_serial: String,
    #[serde(rename = "OSName")]
    pub os_name: String,
    #[serde(rename = "OSVersion")]
    pub os_version: String,
    #[serde(rename = "OSArchitecture")]
    pub os_architecture: String,
    #[serde(rename = "Processor")]
    pub processor: String,
    #[serde(rename = "ProcessorAddressWidth")]
    pub processor_address_width: u32,
}

/// Raw attribute bags for one host, prior to normalization.
///
/// A `None` bag means the category returned no instance or its query failed;
/// failed categories are listed in `failures` so callers can apply policy.
#[derive(Debug, Default)]
pub struct RawFacts {
    pub host: String,
    pub system: Option<AttributeBag>,
    pub os: Option<AttributeBag>,
    pub disk: Option<AttributeBag>,
    pub bios: Option<AttributeBag>,
    pub processor: Option<AttributeBag>,
    pub failures: Vec<CategoryFailure>,
}

/// A non-fatal per-category query failure observed during collection.
#[derive(Debug, Clone)]
pub struct CategoryFailure {
    pub category: QueryCategory,
    pub cause: QueryError,
}
