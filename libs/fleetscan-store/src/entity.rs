//! Persisted inventory row.
//!
//! Column names match the record's wire names exactly; the composite primary
//! key (`ComputerName`, `Drive`) is the upsert key.

use fleetscan_inventory::MachineInfo;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "machine_inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "ComputerName")]
    pub computer_name: String,
    #[sea_orm(column_name = "Domain")]
    pub domain: String,
    #[sea_orm(column_name = "Manufacturer")]
    pub manufacturer: String,
    #[sea_orm(column_name = "Model")]
    pub model: String,
    #[sea_orm(column_name = "RAM")]
    pub ram_gb: i64,
    #[sea_orm(primary_key, auto_increment = false, column_name = "Drive")]
    pub drive: String,
    #[sea_orm(column_name = "DiskSize")]
    pub disk_size_gb: i64,
    #[sea_orm(column_name = "FreeSpace")]
    pub free_space_gb: i64,
    #[sea_orm(column_name = "FreePercent")]
    pub free_percent: i32,
    #[sea_orm(column_name = "BIOSVersion")]
    pub bios_version: String,
    #[sea_orm(column_name = "BIOSSerial")]
    pub bios_serial: String,
    #[sea_orm(column_name = "OSName")]
    pub os_name: String,
    #[sea_orm(column_name = "OSVersion")]
    pub os_version: String,
    #[sea_orm(column_name = "OSArchitecture")]
    pub os_architecture: String,
    #[sea_orm(column_name = "Processor")]
    pub processor: String,
    #[sea_orm(column_name = "ProcessorAddressWidth")]
    pub processor_address_width: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// GiB counts are far below `i64::MAX`; saturate rather than wrap on the
/// pathological path.
pub(crate) fn gb_to_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn percent_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl From<&MachineInfo> for Model {
    fn from(record: &MachineInfo) -> Self {
        Self {
            computer_name: record.computer_name.clone(),
            domain: record.domain.clone(),
            manufacturer: record.manufacturer.clone(),
            model: record.model.clone(),
            ram_gb: gb_to_db(record.ram_gb),
            drive: record.drive.clone(),
            disk_size_gb: gb_to_db(record.disk_size_gb),
            free_space_gb: gb_to_db(record.free_space_gb),
            free_percent: percent_to_db(record.free_percent),
            bios_version: record.bios_version.clone(),
            bios_serial: record.bios_serial.clone(),
            os_name: record.os_name.clone(),
            os_version: record.os_version.clone(),
            os_architecture: record.os_architecture.clone(),
            processor: record.processor.clone(),
            processor_address_width: percent_to_db(record.processor_address_width),
        }
    }
}

impl From<Model> for MachineInfo {
    fn from(row: Model) -> Self {
        Self {
            computer_name: row.computer_name,
            domain: row.domain,
            manufacturer: row.manufacturer,
            model: row.model,
            ram_gb: u64::try_from(row.ram_gb).unwrap_or(0),
            drive: row.drive,
            disk_size_gb: u64::try_from(row.disk_size_gb).unwrap_or(0),
            free_space_gb: u64::try_from(row.free_space_gb).unwrap_or(0),
            free_percent: u32::try_from(row.free_percent).unwrap_or(0),
            bios_version: row.bios_version,
            bios_serial: row.bios_serial,
            os_name: row.os_name,
            os_version: row.os_version,
            os_architecture: row.os_architecture,
            processor: row.processor,
            processor_address_width: u32::try_from(row.processor_address_width).unwrap_or(0),
        }
    }
}
