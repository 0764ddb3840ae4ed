//! Bindings from the HTTP collectors to the poller's source seam.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use sitewatch_collectors::ise::IseCollector;
use sitewatch_collectors::wlc::WlcCollector;
use sitewatch_collectors::CollectorError;
use sitewatch_types::{EquipmentKind, Site, StatusReading};

use crate::config::DeploymentConfig;
use crate::poller::{StatusSource, DEFAULT_REFRESH_INTERVAL};

/// Wireless controller source for one site.
#[derive(Debug, Clone)]
pub struct WlcSource {
    collector: WlcCollector,
    interval: Duration,
}

impl WlcSource {
    /// Wrap a collector with the default 30 second cadence.
    pub fn new(collector: WlcCollector) -> Self {
        Self {
            collector,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Override the refresh cadence.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl StatusSource for WlcSource {
    fn site(&self) -> Site {
        self.collector.site()
    }

    fn kind(&self) -> EquipmentKind {
        EquipmentKind::Wlc
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) -> Result<StatusReading, CollectorError> {
        self.collector.collect().await
    }
}

/// Authentication cluster source for one site.
#[derive(Debug, Clone)]
pub struct IseSource {
    collector: IseCollector,
    interval: Duration,
}

impl IseSource {
    /// Wrap a collector with the default 30 second cadence.
    pub fn new(collector: IseCollector) -> Self {
        Self {
            collector,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Override the refresh cadence.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl StatusSource for IseSource {
    fn site(&self) -> Site {
        self.collector.site()
    }

    fn kind(&self) -> EquipmentKind {
        EquipmentKind::Ise
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) -> Result<StatusReading, CollectorError> {
        self.collector.collect().await
    }
}

/// The sources with live telemetry in the reference deployment: Benguerir's
/// WLC pair and Benguerir's ISE cluster.
///
/// Fortigate, Panorama and everything at Rabat have no collector deployed
/// and stay at their registration defaults.
pub fn wired_sources(config: &DeploymentConfig) -> Vec<Arc<dyn StatusSource>> {
    let wlc = WlcCollector::builder()
        .endpoint(config.backend_endpoint.as_str())
        .site(Site::Benguerir)
        .build();

    let ise = IseCollector::builder()
        .endpoint(config.backend_endpoint.as_str())
        .site(Site::Benguerir)
        .build();

    vec![
        Arc::new(WlcSource::new(wlc)),
        Arc::new(IseSource::new(ise)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wired_sources_cover_benguerir_wlc_and_ise() {
        let sources = wired_sources(&DeploymentConfig::campus());
        assert_eq!(sources.len(), 2);

        let keys: Vec<(Site, EquipmentKind)> =
            sources.iter().map(|s| (s.site(), s.kind())).collect();
        assert!(keys.contains(&(Site::Benguerir, EquipmentKind::Wlc)));
        assert!(keys.contains(&(Site::Benguerir, EquipmentKind::Ise)));
    }

    #[test]
    fn wired_sources_use_the_default_cadence() {
        for source in wired_sources(&DeploymentConfig::campus()) {
            assert_eq!(source.interval(), DEFAULT_REFRESH_INTERVAL);
        }
    }

    #[test]
    fn cadence_is_overridable() {
        let source = WlcSource::new(WlcCollector::builder().build())
            .with_interval(Duration::from_secs(5));
        assert_eq!(StatusSource::interval(&source), Duration::from_secs(5));
    }
}
