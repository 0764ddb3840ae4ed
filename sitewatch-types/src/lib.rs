//! # sitewatch-types
//!
//! Core types for campus equipment monitoring. This crate defines the status
//! model shared between the telemetry collectors, the refresh engine and any
//! view layer rendering the dashboard.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the model works without any
//!   serialization framework
//! - **Optional serialization**: enable the `serde` feature when records
//!   need to cross a process boundary
//! - **Source agnostic**: the same `StatusRecord` shape covers wireless
//!   controllers, firewalls, management consoles and the ISE cluster
//! - **Partial updates**: refresh cycles merge a [`StatusUpdate`] into an
//!   existing record instead of replacing it, so a failed fetch can keep
//!   stale-but-present data on screen
//!
//! ## Example
//!
//! ```rust
//! use sitewatch_types::{HealthStatus, ParameterValue, StatusRecord, StatusUpdate};
//! use std::collections::BTreeMap;
//!
//! let mut record = StatusRecord::new(
//!     HealthStatus::Loading,
//!     "Wireless LAN controllers for the Benguerir campus.",
//! );
//!
//! let mut parameters = BTreeMap::new();
//! parameters.insert("AP Count".to_string(), ParameterValue::plain("142"));
//! parameters.insert("Hot Standby".to_string(), ParameterValue::plain("UP"));
//!
//! record.merge(StatusUpdate {
//!     status: Some(HealthStatus::Online),
//!     parameters: Some(parameters),
//!     detail: None,
//! });
//!
//! assert_eq!(record.status, HealthStatus::Online);
//! assert_eq!(record.parameters.len(), 2);
//! ```

mod cluster;
mod reading;
mod record;
mod status;

pub use cluster::*;
pub use reading::*;
pub use record::*;
pub use status::*;
