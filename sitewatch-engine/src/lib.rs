//! # sitewatch-engine
//!
//! Status aggregation and refresh engine behind the campus equipment
//! dashboard.
//!
//! The engine owns a [`StatusRegistry`] of one record per
//! `(Site, EquipmentKind)` pair and a [`Poller`] that refreshes the wired
//! telemetry sources on independent 30 second timers:
//!
//! ```text
//! timer tick -> fetch (collector) -> normalize -> classify -> registry
//! ```
//!
//! The view layer reads the registry through [`StatusRegistry::get`] and
//! [`StatusRegistry::snapshot`] on its own render schedule; nothing is
//! pushed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sitewatch_engine::sources::wired_sources;
//! use sitewatch_engine::{DeploymentConfig, Poller, StatusRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DeploymentConfig::campus();
//!     let registry = Arc::new(StatusRegistry::new(&config));
//!
//!     let mut poller = Poller::builder(registry.clone());
//!     for source in wired_sources(&config) {
//!         poller = poller.source(source);
//!     }
//!     let handle = poller.build().start();
//!
//!     for ((site, kind), record) in registry.snapshot() {
//!         println!("{site}/{kind}: {}", record.status);
//!     }
//!
//!     handle.stop();
//! }
//! ```
//!
//! ## Failure Containment
//!
//! A failed fetch (transport error, timeout, malformed payload) downgrades
//! that one source's status to `Warning`, keeps its stale parameters on
//! screen and is logged via `tracing`. It never reaches the view layer and
//! never delays another source's cycle.

pub mod classify;
pub mod config;
pub mod poller;
pub mod registry;
pub mod sources;

pub use classify::{classify, ONLINE_THRESHOLD_PERCENT};
pub use config::{DeploymentConfig, Registration, DEFAULT_BACKEND_ENDPOINT};
pub use poller::{Poller, PollerBuilder, PollerHandle, StatusSource, DEFAULT_REFRESH_INTERVAL};
pub use registry::{RegistryError, StatusRegistry};

// Re-export the model for convenience
pub use sitewatch_types::{
    ClusterHealth, ClusterNode, Connectivity, EquipmentKind, HealthSignal, HealthStatus,
    ParameterValue, Site, StatusReading, StatusRecord, StatusUpdate,
};
