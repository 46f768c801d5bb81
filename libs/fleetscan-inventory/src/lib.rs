#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Host Inventory Collection Library
//!
//! This library queries target machines for system, OS, disk, BIOS, and
//! processor attributes over a pluggable management-session boundary,
//! normalizes the raw attribute bags into flat [`MachineInfo`] records, and
//! streams one record per host in input order.
//!
//! The transport behind a session is deliberately out of scope: callers plug
//! any [`SessionProvider`] in. A [`LocalSessionProvider`] backed by the OS is
//! included so the pipeline can run against the machine it executes on.

pub mod collector;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reachability;
pub mod session;

mod local;

pub use error::{CollectionError, HostError, QueryError, SessionError};
pub use local::LocalSessionProvider;
pub use model::{CategoryFailure, MachineInfo, RawFacts};
pub use normalize::normalize;
pub use pipeline::{HostReport, InventoryPipeline, PartialPolicy, PipelineOptions};
pub use reachability::{LivenessProbe, ReachabilityFilter, TcpProbe};
pub use session::{AttributeBag, EqFilter, ManagementSession, QueryCategory, SessionProvider};
