//! Authentication cluster (Cisco ISE) collector.
//!
//! The ISE backend exposes `GET /api/ise/<site>` returning an aggregated
//! summary plus per-node telemetry:
//!
//! ```json
//! {
//!   "total_nodes": 4,
//!   "connected_nodes": 3,
//!   "disconnected_nodes": 1,
//!   "health_percentage": 75.0,
//!   "nodes": [
//!     {
//!       "timestamp": "2024-05-21 10:32:00",
//!       "fqdn": "ise-pan-1.campus.ma",
//!       "ip_address": "10.1.207.61",
//!       "status": "Connected",
//!       "is_connected": true,
//!       "version": "3.1.0.518",
//!       "roles": ["Primary PAN"]
//!     }
//!   ]
//! }
//! ```
//!
//! The normalizer recomputes the counts and percentage from the node list
//! instead of trusting the wire values, so the aggregate invariants hold by
//! construction even against a buggy backend.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use sitewatch_types::{ClusterHealth, ClusterNode, HealthSignal, Site, StatusReading};

use crate::CollectorError;

/// Collector for the authentication cluster of one site.
///
/// Only Benguerir is wired in the reference deployment, but the collector
/// itself is site-parametric.
#[derive(Debug, Clone)]
pub struct IseCollector {
    client: Client,
    endpoint: String,
    site: Site,
}

impl IseCollector {
    /// Create a new builder for configuring the collector.
    pub fn builder() -> IseCollectorBuilder {
        IseCollectorBuilder::default()
    }

    /// The site this collector is wired to.
    pub fn site(&self) -> Site {
        self.site
    }

    /// Fetch and normalize the cluster telemetry.
    pub async fn collect(&self) -> Result<StatusReading, CollectorError> {
        let summary = self.fetch().await?;
        Ok(normalize(summary))
    }

    async fn fetch(&self) -> Result<IseSummary, CollectorError> {
        let url = format!("{}/api/ise/{}", self.endpoint, self.site.slug());

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CollectorError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let summary: IseSummary = response
            .json()
            .await
            .map_err(|e| CollectorError::MalformedPayload(e.to_string()))?;

        Ok(summary)
    }
}

/// Aggregate raw node telemetry into a cluster snapshot plus the role-keyed
/// node parameters.
fn normalize(summary: IseSummary) -> StatusReading {
    let nodes: Vec<ClusterNode> = summary.nodes.into_iter().map(ClusterNode::from).collect();
    let health = ClusterHealth::from_nodes(nodes);
    let parameters = health.node_parameters();
    let signal = HealthSignal::Percentage(health.health_percentage);

    StatusReading::new(parameters, signal).with_detail(health)
}

/// Builder for [`IseCollector`].
#[derive(Debug, Default)]
pub struct IseCollectorBuilder {
    endpoint: Option<String>,
    site: Option<Site>,
    timeout: Option<Duration>,
}

impl IseCollectorBuilder {
    /// Set the backend base URL (e.g. "http://localhost:5000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the site whose cluster to query (default: Benguerir).
    pub fn site(mut self, site: Site) -> Self {
        self.site = Some(site);
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the collector.
    pub fn build(self) -> IseCollector {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        IseCollector {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            site: self.site.unwrap_or(Site::Benguerir),
        }
    }
}

/// Cluster summary from the backend.
///
/// The wire also carries precomputed counts and a percentage; those are
/// ignored and recomputed from `nodes`, so only the node list is required.
#[derive(Debug, Deserialize)]
struct IseSummary {
    nodes: Vec<NodeTelemetry>,
}

/// Per-node telemetry from the backend.
///
/// `version` and `roles` mirror the backend's own tolerances (it fills in
/// "N/A" and `[]` when the upstream API omits them). The per-node
/// `timestamp` is accepted but not surfaced.
#[derive(Debug, Deserialize)]
struct NodeTelemetry {
    fqdn: String,
    ip_address: String,
    status: String,
    is_connected: bool,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    #[allow(dead_code)]
    timestamp: Option<String>,
}

fn default_version() -> String {
    "N/A".to_string()
}

impl From<NodeTelemetry> for ClusterNode {
    fn from(raw: NodeTelemetry) -> Self {
        ClusterNode {
            fqdn: raw.fqdn,
            ip_address: raw.ip_address,
            status: raw.status,
            is_connected: raw.is_connected,
            version: raw.version,
            roles: raw.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewatch_types::Connectivity;

    fn telemetry(fqdn: &str, connected: bool, roles: &[&str]) -> NodeTelemetry {
        NodeTelemetry {
            fqdn: fqdn.to_string(),
            ip_address: "10.1.207.61".to_string(),
            status: if connected { "Connected" } else { "Disconnected" }.to_string(),
            is_connected: connected,
            version: "3.1.0.518".to_string(),
            roles: roles.iter().map(|r| (*r).to_string()).collect(),
            timestamp: None,
        }
    }

    #[test]
    fn builder_defaults() {
        let collector = IseCollector::builder().build();
        assert_eq!(collector.endpoint, "http://localhost:5000");
        assert_eq!(collector.site(), Site::Benguerir);
    }

    #[test]
    fn normalize_reference_cluster() {
        // Four nodes, three connected: the deployment shape the dashboard
        // was built around.
        let summary = IseSummary {
            nodes: vec![
                telemetry("ise-pan-1.campus.ma", true, &["Primary PAN"]),
                telemetry("ise-pan-2.campus.ma", true, &["Secondary PAN"]),
                telemetry("ise-psn-1.campus.ma", true, &["PSN"]),
                telemetry("ise-psn-2.campus.ma", false, &["PSN"]),
            ],
        };

        let reading = normalize(summary);

        let health = reading.detail.as_ref().unwrap();
        assert_eq!(health.total_nodes, 4);
        assert_eq!(health.connected_nodes, 3);
        assert_eq!(health.disconnected_nodes, 1);
        assert!((health.health_percentage - 75.0).abs() < 1e-9);
        assert_eq!(reading.signal, HealthSignal::Percentage(health.health_percentage));

        assert_eq!(reading.parameters.len(), 4);
        assert_eq!(
            reading.parameters["Primary PAN Node"].value(),
            "ise-pan-1.campus.ma (10.1.207.61)"
        );
        assert!(reading.parameters.contains_key("Secondary PAN Node"));
        assert!(reading.parameters.contains_key("PSN Node (ise-psn-1.campus.ma)"));
        assert_eq!(
            reading.parameters["PSN Node (ise-psn-2.campus.ma)"].connectivity(),
            Some(Connectivity::Disconnected)
        );
    }

    #[test]
    fn normalize_ignores_wire_counts() {
        // Counts on the wire contradict the node list; the node list wins.
        let json = r#"{
            "total_nodes": 99,
            "connected_nodes": 0,
            "disconnected_nodes": 99,
            "health_percentage": 12.5,
            "nodes": [
                {"fqdn": "ise-pan-1.campus.ma", "ip_address": "10.1.207.61",
                 "status": "Connected", "is_connected": true,
                 "version": "3.1.0.518", "roles": ["Primary PAN"]}
            ]
        }"#;

        let summary: IseSummary = serde_json::from_str(json).unwrap();
        let reading = normalize(summary);

        let health = reading.detail.unwrap();
        assert_eq!(health.total_nodes, 1);
        assert_eq!(health.connected_nodes, 1);
        assert!((health.health_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_empty_cluster() {
        let reading = normalize(IseSummary { nodes: Vec::new() });
        assert_eq!(reading.signal, HealthSignal::Percentage(0.0));
        assert!(reading.parameters.is_empty());
        assert!(reading.detail.unwrap().is_fully_disconnected());
    }

    #[test]
    fn node_telemetry_defaults_match_backend() {
        let json = r#"{
            "fqdn": "ise-mnt-1.campus.ma",
            "ip_address": "10.1.207.64",
            "status": "Connected",
            "is_connected": true
        }"#;

        let raw: NodeTelemetry = serde_json::from_str(json).unwrap();
        assert_eq!(raw.version, "N/A");
        assert!(raw.roles.is_empty());
    }

    #[test]
    fn summary_requires_node_list() {
        let missing: Result<IseSummary, _> = serde_json::from_str(r#"{"total_nodes": 4}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn node_requires_identity_fields() {
        let missing: Result<NodeTelemetry, _> = serde_json::from_str(
            r#"{"fqdn": "ise-pan-1.campus.ma", "status": "Connected", "is_connected": true}"#,
        );
        assert!(missing.is_err());
    }
}
