#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // Support module provides utilities that may not all be used

//! Test support: a scripted session provider that counts opens and closes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fleetscan_inventory::collector::attrs;
use fleetscan_inventory::{
    AttributeBag, EqFilter, ManagementSession, QueryCategory, QueryError, SessionError,
    SessionProvider,
};

pub const GIB: u64 = 1 << 30;

/// Scripted behavior for one host.
#[derive(Default, Clone)]
pub struct HostScript {
    /// When set, `open` fails with this reason.
    pub open_error: Option<String>,
    /// Per-category responses; a missing entry answers "no instance".
    pub responses: HashMap<QueryCategory, Result<Vec<AttributeBag>, QueryError>>,
}

impl HostScript {
    pub fn unreachable(reason: &str) -> Self {
        Self {
            open_error: Some(reason.to_owned()),
            ..Self::default()
        }
    }

    pub fn respond(mut self, category: QueryCategory, bags: Vec<AttributeBag>) -> Self {
        self.responses.insert(category, Ok(bags));
        self
    }

    pub fn fail(mut self, category: QueryCategory, error: QueryError) -> Self {
        self.responses.insert(category, Err(error));
        self
    }
}

/// A fully healthy host with the given memory and disk numbers.
pub fn full_script(name: &str, ram_bytes: u64, disk_bytes: u64, free_bytes: u64) -> HostScript {
    HostScript::default()
        .respond(
            QueryCategory::SystemSummary,
            vec![
                AttributeBag::new()
                    .with(attrs::NAME, name)
                    .with(attrs::DOMAIN, "corp.example")
                    .with(attrs::MANUFACTURER, "Acme")
                    .with(attrs::MODEL, "Rack 9000")
                    .with(attrs::TOTAL_PHYSICAL_MEMORY, ram_bytes),
            ],
        )
        .respond(
            QueryCategory::OsSummary,
            vec![
                AttributeBag::new()
                    .with(attrs::CAPTION, "Example OS 12")
                    .with(attrs::VERSION, "12.4")
                    .with(attrs::OS_ARCHITECTURE, "64-bit")
                    .with(attrs::SYSTEM_DRIVE, "C:"),
            ],
        )
        .respond(
            QueryCategory::LogicalDisk,
            vec![
                AttributeBag::new()
                    .with(attrs::DEVICE_ID, "C:")
                    .with(attrs::SIZE, disk_bytes)
                    .with(attrs::FREE_SPACE, free_bytes),
            ],
        )
        .respond(
            QueryCategory::Bios,
            vec![
                AttributeBag::new()
                    .with(attrs::BIOS_VERSION, "1.2.3")
                    .with(attrs::SERIAL_NUMBER, "SER-42"),
            ],
        )
        .respond(
            QueryCategory::Processor,
            vec![
                AttributeBag::new()
                    .with(attrs::PROCESSOR_NAME, "Acme CPU")
                    .with(attrs::ADDRESS_WIDTH, 64_u64),
            ],
        )
}

/// Session provider with per-host scripts and open/close accounting.
#[derive(Default)]
pub struct FakeSessionProvider {
    scripts: HashMap<String, HostScript>,
    opened: AtomicUsize,
    closed: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<(String, QueryCategory, Option<EqFilter>)>>>,
}

impl FakeSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, host: &str, script: HostScript) -> Self {
        self.scripts.insert(host.to_owned(), script);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Every query issued, in order: (host, category, filter).
    pub fn queries(&self) -> Vec<(String, QueryCategory, Option<EqFilter>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionProvider for FakeSessionProvider {
    async fn open(&self, host: &str) -> Result<Box<dyn ManagementSession>, SessionError> {
        let script = self.scripts.get(host).cloned().unwrap_or_default();
        if let Some(reason) = script.open_error {
            return Err(SessionError::unreachable(host, reason));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            host: host.to_owned(),
            script,
            closed: Arc::clone(&self.closed),
            queries: Arc::clone(&self.queries),
        }))
    }
}

struct FakeSession {
    host: String,
    script: HostScript,
    closed: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<(String, QueryCategory, Option<EqFilter>)>>>,
}

#[async_trait]
impl ManagementSession for FakeSession {
    fn host(&self) -> &str {
        &self.host
    }

    async fn query(
        &self,
        category: QueryCategory,
        filter: Option<&EqFilter>,
    ) -> Result<Vec<AttributeBag>, QueryError> {
        self.queries
            .lock()
            .unwrap()
            .push((self.host.clone(), category, filter.cloned()));
        self.script
            .responses
            .get(&category)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
