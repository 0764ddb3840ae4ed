//! Periodic refresh scheduling, one isolated task per telemetry source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use sitewatch_collectors::CollectorError;
use sitewatch_types::{EquipmentKind, HealthStatus, Site, StatusReading, StatusUpdate};

use crate::classify::classify;
use crate::registry::StatusRegistry;

/// Refresh cadence of the wired sources in the reference deployment.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// One periodically-refreshed telemetry source.
///
/// A source owns the fetch *and* the normalization: `refresh` returns the
/// already-normalized [`StatusReading`] (or a contained error), and the
/// poller handles classification and the registry commit.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// The site this source feeds.
    fn site(&self) -> Site;

    /// The equipment kind this source feeds.
    fn kind(&self) -> EquipmentKind;

    /// Refresh cadence for this source.
    fn interval(&self) -> Duration {
        DEFAULT_REFRESH_INTERVAL
    }

    /// Fetch and normalize one reading.
    async fn refresh(&self) -> Result<StatusReading, CollectorError>;
}

/// Drives periodic refresh cycles for a set of sources against one
/// registry.
///
/// Each source runs on its own tokio task with its own timer, so a slow or
/// failing source delays only its own next tick and can never block or
/// degrade another source's cycle.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sitewatch_engine::{DeploymentConfig, Poller, StatusRegistry};
/// use sitewatch_engine::sources::wired_sources;
///
/// #[tokio::main]
/// async fn main() {
///     let config = DeploymentConfig::campus();
///     let registry = Arc::new(StatusRegistry::new(&config));
///
///     let mut builder = Poller::builder(registry.clone());
///     for source in wired_sources(&config) {
///         builder = builder.source(source);
///     }
///     let handle = builder.build().start();
///
///     // ... the view layer reads registry.snapshot() on its own schedule ...
///
///     handle.stop(); // cancels all source timers
/// }
/// ```
#[derive(Clone)]
pub struct Poller {
    registry: Arc<StatusRegistry>,
    sources: Vec<Arc<dyn StatusSource>>,
}

impl Poller {
    /// Create a builder for configuring the poller.
    pub fn builder(registry: Arc<StatusRegistry>) -> PollerBuilder {
        PollerBuilder {
            registry,
            sources: Vec::new(),
        }
    }

    /// Spawn one refresh task per source and return the stop handle.
    ///
    /// Every source performs an immediate refresh before its first
    /// scheduled tick, so the registry is populated as soon as possible
    /// after start.
    pub fn start(&self) -> PollerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);

        for source in &self.sources {
            tokio::spawn(run_source(
                self.registry.clone(),
                source.clone(),
                stop_rx.clone(),
            ));
        }

        PollerHandle { stop_tx }
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("sources", &self.sources.len())
            .finish()
    }
}

/// Builder for [`Poller`].
pub struct PollerBuilder {
    registry: Arc<StatusRegistry>,
    sources: Vec<Arc<dyn StatusSource>>,
}

impl PollerBuilder {
    /// Add a source to be refreshed on its own cadence.
    pub fn source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Build the poller.
    pub fn build(self) -> Poller {
        Poller {
            registry: self.registry,
            sources: self.sources,
        }
    }
}

impl std::fmt::Debug for PollerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollerBuilder")
            .field("sources", &self.sources.len())
            .finish()
    }
}

/// Handle for stopping all source tasks.
///
/// Call [`stop`](Self::stop) explicitly, or just drop the handle: closing
/// the stop channel ends every task, so a poller cannot outlive the owner
/// that started it.
#[derive(Debug)]
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
}

impl PollerHandle {
    /// Stop all source refresh tasks.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}

async fn run_source(
    registry: Arc<StatusRegistry>,
    source: Arc<dyn StatusSource>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(source.interval());
    // A hung fetch must not cause a burst of catch-up ticks afterwards.
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // First tick completes immediately: the initial refresh.
            _ = ticker.tick() => {
                refresh_once(&registry, source.as_ref()).await;
            }
            changed = stop_rx.changed() => {
                // Err means the handle was dropped; both end the task.
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
        }
    }
}

/// Run one full refresh cycle for a source.
///
/// Any fetch or payload error is contained here: the source's status drops
/// to `Warning`, prior parameters stay on screen, and nothing propagates
/// past the scheduler boundary.
async fn refresh_once(registry: &StatusRegistry, source: &dyn StatusSource) {
    let site = source.site();
    let kind = source.kind();

    if let Err(err) = registry.apply(site, kind, StatusUpdate::status_only(HealthStatus::Loading)) {
        // Sources are wired from the same config as the registry, so this
        // is a broken deployment wiring, not a runtime condition.
        error!(%site, %kind, %err, "source refers to an unregistered key");
        debug_assert!(false, "source for unregistered key ({site}, {kind})");
        return;
    }

    match source.refresh().await {
        Ok(reading) => {
            let status = classify(reading.signal);
            let update = StatusUpdate {
                status: Some(status),
                parameters: Some(reading.parameters),
                detail: reading.detail,
            };
            // The key existed a moment ago and keys are never removed.
            let _ = registry.apply(site, kind, update);
            debug!(%site, %kind, %status, "refresh committed");
        }
        Err(err) => {
            warn!(%site, %kind, %err, "refresh failed, keeping stale parameters");
            let _ = registry.apply(site, kind, StatusUpdate::status_only(HealthStatus::Warning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentConfig;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    use sitewatch_types::{HealthSignal, ParameterValue};

    enum Script {
        AlwaysOk(StatusReading),
        AlwaysErr,
        OkThenErr(StatusReading),
        Gated(StatusReading, Arc<Notify>),
    }

    struct FakeSource {
        site: Site,
        kind: EquipmentKind,
        calls: AtomicUsize,
        script: Script,
    }

    impl FakeSource {
        fn new(site: Site, kind: EquipmentKind, script: Script) -> Arc<Self> {
            Arc::new(Self {
                site,
                kind,
                calls: AtomicUsize::new(0),
                script,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for FakeSource {
        fn site(&self) -> Site {
            self.site
        }

        fn kind(&self) -> EquipmentKind {
            self.kind
        }

        async fn refresh(&self) -> Result<StatusReading, CollectorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::AlwaysOk(reading) => Ok(reading.clone()),
                Script::AlwaysErr => Err(CollectorError::Http("backend down".to_string())),
                Script::OkThenErr(reading) => {
                    if call == 0 {
                        Ok(reading.clone())
                    } else {
                        Err(CollectorError::Timeout)
                    }
                }
                Script::Gated(reading, gate) => {
                    gate.notified().await;
                    Ok(reading.clone())
                }
            }
        }
    }

    fn wlc_reading() -> StatusReading {
        let mut parameters = BTreeMap::new();
        parameters.insert("AP Count".to_string(), ParameterValue::plain("5"));
        parameters.insert("Hot Standby".to_string(), ParameterValue::plain("UP"));
        StatusReading::new(parameters, HealthSignal::Healthy(true))
    }

    fn registry() -> Arc<StatusRegistry> {
        Arc::new(StatusRegistry::new(&DeploymentConfig::campus()))
    }

    #[tokio::test(start_paused = true)]
    async fn initial_refresh_happens_before_first_interval() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );

        let handle = Poller::builder(registry.clone())
            .source(source.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(source.calls(), 1);
        let record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(record.status, HealthStatus::Online);
        assert_eq!(record.parameters["AP Count"].value(), "5");

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_refresh_fires_every_interval() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );

        let handle = Poller::builder(registry.clone())
            .source(source.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(source.calls(), 2);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.calls(), 3);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn record_shows_loading_while_fetch_is_in_flight() {
        let registry = registry();
        let gate = Arc::new(Notify::new());
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::Gated(wlc_reading(), gate.clone()),
        );

        let handle = Poller::builder(registry.clone())
            .source(source)
            .build()
            .start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        let record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(record.status, HealthStatus::Loading);

        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(1)).await;
        let record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(record.status, HealthStatus::Online);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn failure_downgrades_status_and_keeps_stale_parameters() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::OkThenErr(wlc_reading()),
        );

        let handle = Poller::builder(registry.clone())
            .source(source.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        let record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(record.status, HealthStatus::Online);

        // Second cycle times out: only the status may change.
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(source.calls(), 2);
        let record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(record.status, HealthStatus::Warning);
        assert_eq!(record.parameters["AP Count"].value(), "5");
        assert_eq!(record.parameters["Hot Standby"].value(), "UP");

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn failing_source_does_not_disturb_other_sources() {
        let registry = registry();
        let wlc = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );
        let ise = FakeSource::new(Site::Benguerir, EquipmentKind::Ise, Script::AlwaysErr);

        let handle = Poller::builder(registry.clone())
            .source(wlc.clone())
            .source(ise.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_secs(31)).await;

        // The broken ISE source keeps failing on schedule...
        assert_eq!(ise.calls(), 2);
        let ise_record = registry.get(Site::Benguerir, EquipmentKind::Ise).unwrap();
        assert_eq!(ise_record.status, HealthStatus::Warning);

        // ...while the WLC source keeps refreshing on time, unaffected.
        assert_eq!(wlc.calls(), 2);
        let wlc_record = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();
        assert_eq!(wlc_record.status, HealthStatus::Online);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_all_source_tasks() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );

        let handle = Poller::builder(registry)
            .source(source.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(source.calls(), 1);

        handle.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_too() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );

        let handle = Poller::builder(registry)
            .source(source.clone())
            .build()
            .start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn repeated_success_produces_identical_records() {
        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Wlc,
            Script::AlwaysOk(wlc_reading()),
        );

        refresh_once(registry.as_ref(), source.as_ref()).await;
        let first = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();

        refresh_once(registry.as_ref(), source.as_ref()).await;
        let second = registry.get(Site::Benguerir, EquipmentKind::Wlc).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn ise_end_to_end_reference_scenario() {
        use sitewatch_types::{ClusterHealth, ClusterNode};

        // 4 nodes, 3 connected: 75% is at or below the threshold, so the
        // committed status is Warning even though the fetch succeeded.
        let nodes: Vec<ClusterNode> = [
            ("ise-pan-1.campus.ma", true, "Primary PAN"),
            ("ise-pan-2.campus.ma", true, "Secondary PAN"),
            ("ise-psn-1.campus.ma", true, "PSN"),
            ("ise-psn-2.campus.ma", false, "PSN"),
        ]
        .into_iter()
        .map(|(fqdn, connected, role)| ClusterNode {
            fqdn: fqdn.to_string(),
            ip_address: "10.1.207.61".to_string(),
            status: "Connected".to_string(),
            is_connected: connected,
            version: "3.1.0.518".to_string(),
            roles: vec![role.to_string()],
        })
        .collect();

        let health = ClusterHealth::from_nodes(nodes);
        let reading = StatusReading::new(
            health.node_parameters(),
            HealthSignal::Percentage(health.health_percentage),
        )
        .with_detail(health);

        let registry = registry();
        let source = FakeSource::new(
            Site::Benguerir,
            EquipmentKind::Ise,
            Script::AlwaysOk(reading),
        );

        let placeholder = registry.get(Site::Benguerir, EquipmentKind::Ise).unwrap();
        assert_eq!(placeholder.status, HealthStatus::Loading);
        assert!(placeholder.parameters.is_empty());

        refresh_once(registry.as_ref(), source.as_ref()).await;

        let record = registry.get(Site::Benguerir, EquipmentKind::Ise).unwrap();
        assert_eq!(record.status, HealthStatus::Warning);

        let detail = record.detail.unwrap();
        assert_eq!(detail.total_nodes, 4);
        assert_eq!(detail.connected_nodes, 3);
        assert_eq!(detail.disconnected_nodes, 1);

        assert_eq!(record.parameters.len(), 4);
        assert!(record.parameters.contains_key("Primary PAN Node"));
        assert!(record.parameters.contains_key("Secondary PAN Node"));
        assert!(record.parameters.contains_key("PSN Node (ise-psn-1.campus.ma)"));
        assert!(record.parameters.contains_key("PSN Node (ise-psn-2.campus.ma)"));
    }
}
