//! Record normalizer: raw attribute bags → one flat [`MachineInfo`].

use crate::collector::attrs;
use crate::model::{MachineInfo, RawFacts};
use crate::session::AttributeBag;

const BYTES_PER_GIB: u64 = 1 << 30;

/// Truncating byte → GiB conversion.
fn bytes_to_gib(bytes: u64) -> u64 {
    bytes / BYTES_PER_GIB
}

/// Truncating percentage with an explicit zero-denominator guard.
fn percent_of(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = part.saturating_mul(100) / total;
    u32::try_from(percent.min(100)).unwrap_or(100)
}

fn str_attr(bag: Option<&AttributeBag>, key: &str) -> String {
    bag.and_then(|b| b.get_str(key)).unwrap_or_default().to_owned()
}

fn u64_attr(bag: Option<&AttributeBag>, key: &str) -> u64 {
    bag.and_then(|b| b.get_u64(key)).unwrap_or(0)
}

/// Map raw facts into a [`MachineInfo`] record.
///
/// Pure and total: missing bags and missing attributes map deterministically
/// to empty strings and zeros; byte counts convert to whole GiB by floor
/// division; a zero-size disk yields `free_percent = 0`, never a division
/// fault.
#[must_use]
pub fn normalize(facts: &RawFacts) -> MachineInfo {
    let system = facts.system.as_ref();
    let os = facts.os.as_ref();
    let disk = facts.disk.as_ref();
    let bios = facts.bios.as_ref();
    let cpu = facts.processor.as_ref();

    let disk_size_bytes = u64_attr(disk, attrs::SIZE);
    let disk_free_bytes = u64_attr(disk, attrs::FREE_SPACE);

    // The drive id comes from the disk instance; fall back to the OS summary
    // when the disk query returned nothing.
    let mut drive = str_attr(disk, attrs::DEVICE_ID);
    if drive.is_empty() {
        drive = str_attr(os, attrs::SYSTEM_DRIVE);
    }

    MachineInfo {
        computer_name: str_attr(system, attrs::NAME),
        domain: str_attr(system, attrs::DOMAIN),
        manufacturer: str_attr(system, attrs::MANUFACTURER),
        model: str_attr(system, attrs::MODEL),
        ram_gb: bytes_to_gib(u64_attr(system, attrs::TOTAL_PHYSICAL_MEMORY)),
        drive,
        disk_size_gb: bytes_to_gib(disk_size_bytes),
        free_space_gb: bytes_to_gib(disk_free_bytes),
        free_percent: percent_of(disk_free_bytes, disk_size_bytes),
        bios_version: str_attr(bios, attrs::BIOS_VERSION),
        bios_serial: str_attr(bios, attrs::SERIAL_NUMBER),
        os_name: str_attr(os, attrs::CAPTION),
        os_version: str_attr(os, attrs::VERSION),
        os_architecture: str_attr(os, attrs::OS_ARCHITECTURE),
        processor: str_attr(cpu, attrs::PROCESSOR_NAME),
        processor_address_width: cpu
            .and_then(|b| b.get_u32(attrs::ADDRESS_WIDTH))
            .unwrap_or(0),
    }
}
