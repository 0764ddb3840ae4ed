//! # sitewatch-collectors
//!
//! Typed collectors for the backend telemetry services feeding the campus
//! dashboard.
//!
//! Each collector wraps one request/response HTTP endpoint and pairs the
//! fetch with a pure normalizer that converts the source-specific payload
//! shape into a [`StatusReading`](sitewatch_types::StatusReading): display
//! parameters plus the health signal the engine's classifier consumes.
//!
//! ## Supported Sources
//!
//! - **WLC** ([`wlc`]) - wireless controller HA state and access point
//!   count, per site
//! - **ISE** ([`ise`]) - authentication cluster node telemetry, aggregated
//!   into a cluster health snapshot
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitewatch_collectors::wlc::WlcCollector;
//! use sitewatch_types::Site;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collector = WlcCollector::builder()
//!         .endpoint("http://localhost:5000")
//!         .site(Site::Benguerir)
//!         .build();
//!
//!     let reading = collector.collect().await?;
//!     println!("signal: {:?}", reading.signal);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ise;
pub mod wlc;

pub use error::CollectorError;

// Re-export types for convenience
pub use sitewatch_types::{ClusterHealth, ClusterNode, HealthSignal, StatusReading};
