//! Cluster health aggregation for the authentication service (Cisco ISE).

use std::collections::BTreeMap;

use crate::ParameterValue;

/// One member server of the ISE deployment.
///
/// `status` is the label the collector reported for the node and is surfaced
/// verbatim; it is independent of `is_connected`, which drives the
/// connectivity badge and the aggregate counts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterNode {
    pub fqdn: String,
    pub ip_address: String,
    pub status: String,
    pub is_connected: bool,
    pub version: String,
    /// Functional roles held by this node; a node may hold several.
    pub roles: Vec<String>,
}

impl ClusterNode {
    /// Whether this node holds the given role tag.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.tag())
    }

    /// The parameter key this node is surfaced under.
    ///
    /// PAN roles map to fixed keys so the dashboard slots stay stable across
    /// refreshes; PSN nodes embed their FQDN so several PSNs get distinct
    /// entries; role-less nodes fall back to their own FQDN.
    pub fn parameter_key(&self) -> String {
        if self.has_role(Role::PrimaryPan) {
            "Primary PAN Node".to_string()
        } else if self.has_role(Role::SecondaryPan) {
            "Secondary PAN Node".to_string()
        } else if self.has_role(Role::Psn) {
            format!("PSN Node ({})", self.fqdn)
        } else {
            self.fqdn.clone()
        }
    }

    /// The parameter value this node is surfaced as: `fqdn (ip)` plus a
    /// connectivity badge.
    pub fn parameter_value(&self) -> ParameterValue {
        ParameterValue::with_connectivity(
            format!("{} ({})", self.fqdn, self.ip_address),
            self.is_connected,
        )
    }
}

/// Distinguished roles a cluster node may hold.
///
/// These are opaque tags as far as the engine is concerned; they only decide
/// which parameter slot a node lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    PrimaryPan,
    SecondaryPan,
    Psn,
}

impl Role {
    /// The tag string as it appears in collector payloads.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::PrimaryPan => "Primary PAN",
            Role::SecondaryPan => "Secondary PAN",
            Role::Psn => "PSN",
        }
    }
}

/// Aggregated connectivity of the whole ISE node cluster.
///
/// Counts and percentage are always derived from the node list via
/// [`ClusterHealth::from_nodes`], never trusted from the wire, so the
/// invariant `connected_nodes + disconnected_nodes == total_nodes` holds by
/// construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterHealth {
    pub total_nodes: u32,
    pub connected_nodes: u32,
    pub disconnected_nodes: u32,
    /// `connected / total * 100`, or 0 for an empty cluster. In [0, 100].
    pub health_percentage: f64,
    pub nodes: Vec<ClusterNode>,
}

impl ClusterHealth {
    /// An empty snapshot, used as the registration-time placeholder.
    pub fn empty() -> Self {
        Self {
            total_nodes: 0,
            connected_nodes: 0,
            disconnected_nodes: 0,
            health_percentage: 0.0,
            nodes: Vec::new(),
        }
    }

    /// Aggregate a node list into a health snapshot.
    pub fn from_nodes(nodes: Vec<ClusterNode>) -> Self {
        let total = nodes.len() as u32;
        let connected = nodes.iter().filter(|n| n.is_connected).count() as u32;
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(connected) / f64::from(total) * 100.0
        };

        Self {
            total_nodes: total,
            connected_nodes: connected,
            disconnected_nodes: total - connected,
            health_percentage: percentage,
            nodes,
        }
    }

    /// Whether every member of the cluster is disconnected (or the cluster
    /// is empty). The view layer renders a dedicated banner for this case.
    pub fn is_fully_disconnected(&self) -> bool {
        self.connected_nodes == 0
    }

    /// Derive the per-node parameter entries for this snapshot.
    pub fn node_parameters(&self) -> BTreeMap<String, ParameterValue> {
        self.nodes
            .iter()
            .map(|node| (node.parameter_key(), node.parameter_value()))
            .collect()
    }
}

impl Default for ClusterHealth {
    fn default() -> Self {
        Self::empty()
    }
}
