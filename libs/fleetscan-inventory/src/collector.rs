//! Fact collector: five fixed read-only queries against one session.

use crate::error::CollectionError;
use crate::model::{CategoryFailure, RawFacts};
use crate::session::{AttributeBag, EqFilter, ManagementSession, QueryCategory};

/// Attribute names the collector reads out of each category.
pub mod attrs {
    // SystemSummary
    pub const NAME: &str = "Name";
    pub const DOMAIN: &str = "Domain";
    pub const MANUFACTURER: &str = "Manufacturer";
    pub const MODEL: &str = "Model";
    pub const TOTAL_PHYSICAL_MEMORY: &str = "TotalPhysicalMemory";

    // OsSummary
    pub const CAPTION: &str = "Caption";
    pub const VERSION: &str = "Version";
    pub const OS_ARCHITECTURE: &str = "OSArchitecture";
    pub const SYSTEM_DRIVE: &str = "SystemDrive";

    // LogicalDisk
    pub const DEVICE_ID: &str = "DeviceID";
    pub const SIZE: &str = "Size";
    pub const FREE_SPACE: &str = "FreeSpace";

    // Bios
    pub const BIOS_VERSION: &str = "SMBIOSBIOSVersion";
    pub const SERIAL_NUMBER: &str = "SerialNumber";

    // Processor
    pub const PROCESSOR_NAME: &str = "Name";
    pub const ADDRESS_WIDTH: &str = "AddressWidth";
}

/// Collect the raw attribute bags for `host` over an open session.
///
/// Queries run in a fixed order; the logical-disk query is keyed by the
/// device id the OS summary reported, so it only runs once that id is known,
/// and is skipped (bag absent) when the OS summary yields none.
///
/// A category that returns no instance leaves its bag absent. A category
/// whose query transport-fails is recorded in [`RawFacts::failures`] and
/// collection continues — except for the system summary, which carries the
/// host identity and is therefore load-bearing.
///
/// # Errors
/// [`CollectionError`] when the system-summary query transport-fails.
pub async fn collect(
    session: &dyn ManagementSession,
    host: &str,
) -> Result<RawFacts, CollectionError> {
    let mut facts = RawFacts {
        host: host.to_owned(),
        ..RawFacts::default()
    };

    facts.system = match session.query(QueryCategory::SystemSummary, None).await {
        Ok(bags) => first_instance(host, QueryCategory::SystemSummary, bags),
        Err(cause) => {
            return Err(CollectionError {
                host: host.to_owned(),
                category: QueryCategory::SystemSummary,
                cause,
            });
        }
    };

    facts.os = run_category(session, host, QueryCategory::OsSummary, None, &mut facts.failures)
        .await;

    let device_id = facts
        .os
        .as_ref()
        .and_then(|bag| bag.get_str(attrs::SYSTEM_DRIVE))
        .map(str::to_owned);
    facts.disk = match device_id {
        Some(id) => {
            let filter = EqFilter::new(attrs::DEVICE_ID, id);
            run_category(
                session,
                host,
                QueryCategory::LogicalDisk,
                Some(&filter),
                &mut facts.failures,
            )
            .await
        }
        None => {
            tracing::debug!(host, "no system drive reported; skipping logical disk query");
            None
        }
    };

    facts.bios =
        run_category(session, host, QueryCategory::Bios, None, &mut facts.failures).await;
    facts.processor =
        run_category(session, host, QueryCategory::Processor, None, &mut facts.failures).await;

    Ok(facts)
}

/// One non-load-bearing category: failures degrade to a recorded
/// [`CategoryFailure`] instead of aborting the host.
async fn run_category(
    session: &dyn ManagementSession,
    host: &str,
    category: QueryCategory,
    filter: Option<&EqFilter>,
    failures: &mut Vec<CategoryFailure>,
) -> Option<AttributeBag> {
    match session.query(category, filter).await {
        Ok(bags) => first_instance(host, category, bags),
        Err(cause) => {
            tracing::warn!(host, %category, error = %cause, "query failed; continuing with remaining categories");
            failures.push(CategoryFailure { category, cause });
            None
        }
    }
}

fn first_instance(
    host: &str,
    category: QueryCategory,
    bags: Vec<AttributeBag>,
) -> Option<AttributeBag> {
    let bag = bags.into_iter().next();
    if bag.is_none() {
        tracing::debug!(host, %category, "query returned no instance");
    }
    bag
}
