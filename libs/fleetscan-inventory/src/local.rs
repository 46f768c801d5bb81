//! Session provider for the machine the process runs on.
//!
//! Answers the five query categories from the operating system. Attributes
//! the OS does not expose (chassis manufacturer/model, firmware) come back as
//! "no instance", exercising the same partial-record path a remote transport
//! would on a locked-down host.

use std::sync::Mutex;

use async_trait::async_trait;
use sysinfo::System;

use crate::collector::attrs;
use crate::error::{QueryError, SessionError};
use crate::session::{
    AttributeBag, EqFilter, ManagementSession, QueryCategory, SessionProvider,
};

#[cfg(windows)]
const SYSTEM_DRIVE: &str = "C:";
#[cfg(not(windows))]
const SYSTEM_DRIVE: &str = "/";

/// Opens sessions only for the local machine: `localhost`, a loopback
/// address, or the machine's own hostname.
#[derive(Debug, Default)]
pub struct LocalSessionProvider;

impl LocalSessionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn local_hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_owned())
}

fn is_local(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host == "127.0.0.1"
        || host == "::1"
        || host.eq_ignore_ascii_case(&local_hostname())
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn open(&self, host: &str) -> Result<Box<dyn ManagementSession>, SessionError> {
        if !is_local(host) {
            return Err(SessionError::unreachable(
                host,
                "local provider only serves the machine it runs on",
            ));
        }
        Ok(Box::new(LocalSession {
            host: host.to_owned(),
            system: Mutex::new(System::new_all()),
        }))
    }
}

struct LocalSession {
    host: String,
    system: Mutex<System>,
}

#[async_trait]
impl ManagementSession for LocalSession {
    fn host(&self) -> &str {
        &self.host
    }

    async fn query(
        &self,
        category: QueryCategory,
        filter: Option<&EqFilter>,
    ) -> Result<Vec<AttributeBag>, QueryError> {
        match category {
            QueryCategory::SystemSummary => {
                let mut sys = self
                    .system
                    .lock()
                    .map_err(|e| QueryError::Transport(e.to_string()))?;
                sys.refresh_memory();
                Ok(vec![
                    AttributeBag::new()
                        .with(attrs::NAME, local_hostname())
                        .with(attrs::TOTAL_PHYSICAL_MEMORY, sys.total_memory()),
                ])
            }
            QueryCategory::OsSummary => {
                let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_owned());
                let version = System::os_version().unwrap_or_else(|| "unknown".to_owned());
                Ok(vec![
                    AttributeBag::new()
                        .with(attrs::CAPTION, name)
                        .with(attrs::VERSION, version)
                        .with(attrs::OS_ARCHITECTURE, std::env::consts::ARCH)
                        .with(attrs::SYSTEM_DRIVE, SYSTEM_DRIVE),
                ])
            }
            QueryCategory::LogicalDisk => Ok(logical_disk(filter)),
            // Firmware is not exposed portably: no instance.
            QueryCategory::Bios => Ok(Vec::new()),
            QueryCategory::Processor => {
                let sys = self
                    .system
                    .lock()
                    .map_err(|e| QueryError::Transport(e.to_string()))?;
                let brand = sys
                    .cpus()
                    .first()
                    .map(|cpu| cpu.brand().to_owned())
                    .unwrap_or_else(|| "Unknown".to_owned());
                Ok(vec![
                    AttributeBag::new()
                        .with(attrs::PROCESSOR_NAME, brand)
                        .with(attrs::ADDRESS_WIDTH, address_width()),
                ])
            }
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

fn address_width() -> u64 {
    #[cfg(target_pointer_width = "64")]
    {
        64
    }
    #[cfg(target_pointer_width = "32")]
    {
        32
    }
}

fn logical_disk(filter: Option<&EqFilter>) -> Vec<AttributeBag> {
    let wanted = filter.map_or(SYSTEM_DRIVE, |f| f.value.as_str());
    let disks = sysinfo::Disks::new_with_refreshed_list();
    disks
        .iter()
        .filter(|disk| disk.mount_point().to_string_lossy() == wanted)
        .map(|disk| {
            AttributeBag::new()
                .with(attrs::DEVICE_ID, disk.mount_point().to_string_lossy().into_owned())
                .with(attrs::SIZE, disk.total_space())
                .with(attrs::FREE_SPACE, disk.available_space())
        })
        .collect()
}
