//! Status records and the partial updates merged into them.

use core::fmt;
use std::collections::BTreeMap;

use crate::{ClusterHealth, HealthStatus, ParameterValue};

/// One physical campus location with its own equipment set.
///
/// The deployment is a fixed pair of sites; there is no dynamic discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Site {
    Benguerir,
    Rabat,
}

impl Site {
    /// All sites of the deployment.
    pub const ALL: [Site; 2] = [Site::Benguerir, Site::Rabat];

    /// The lowercase path segment used by the backend API routes.
    pub fn slug(&self) -> &'static str {
        match self {
            Site::Benguerir => "benguerir",
            Site::Rabat => "rabat",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Benguerir => f.write_str("Benguerir"),
            Site::Rabat => f.write_str("Rabat"),
        }
    }
}

/// A category of managed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    /// Wireless LAN controller pair.
    Wlc,
    /// Fortigate firewall.
    Fortigate,
    /// Panorama firewall-management console.
    Panorama,
    /// Cisco ISE authentication cluster.
    Ise,
}

impl EquipmentKind {
    /// All equipment kinds managed per site.
    pub const ALL: [EquipmentKind; 4] = [
        EquipmentKind::Wlc,
        EquipmentKind::Fortigate,
        EquipmentKind::Panorama,
        EquipmentKind::Ise,
    ];
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentKind::Wlc => f.write_str("WLC"),
            EquipmentKind::Fortigate => f.write_str("Fortigate"),
            EquipmentKind::Panorama => f.write_str("Panorama"),
            EquipmentKind::Ise => f.write_str("ISE"),
        }
    }
}

/// Current status of one `(Site, EquipmentKind)` entry.
///
/// Records are created once with placeholder values when the registry is
/// initialized and mutated in place by refresh cycles for the lifetime of
/// the process. `description` is fixed at registration; everything else is
/// replaced through [`StatusRecord::merge`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRecord {
    pub status: HealthStatus,
    pub description: String,
    /// Ordered map of display parameters.
    pub parameters: BTreeMap<String, ParameterValue>,
    /// Cluster aggregation, present only for the ISE kind.
    pub detail: Option<ClusterHealth>,
}

impl StatusRecord {
    /// Create a record with no parameters and no detail.
    pub fn new(status: HealthStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            parameters: BTreeMap::new(),
            detail: None,
        }
    }

    /// Attach placeholder parameters at registration time.
    pub fn with_parameters(mut self, parameters: BTreeMap<String, ParameterValue>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach a placeholder cluster snapshot at registration time.
    pub fn with_detail(mut self, detail: ClusterHealth) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Merge a partial update into this record.
    ///
    /// Fields the update leaves as `None` keep their prior value; this is
    /// what keeps stale parameters on screen when a refresh fails and only
    /// the status flips to `Warning`.
    pub fn merge(&mut self, update: StatusUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(parameters) = update.parameters {
            self.parameters = parameters;
        }
        if let Some(detail) = update.detail {
            self.detail = Some(detail);
        }
    }
}

/// A partial update produced by one refresh cycle.
///
/// Unset fields are not touched by the merge. The description of a record
/// is deliberately absent: it is immutable after registration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusUpdate {
    pub status: Option<HealthStatus>,
    pub parameters: Option<BTreeMap<String, ParameterValue>>,
    pub detail: Option<ClusterHealth>,
}

impl StatusUpdate {
    /// An update that only changes the categorical status.
    ///
    /// Used for the `Loading` transition at the start of a cycle and the
    /// `Warning` fallback when a fetch fails.
    pub fn status_only(status: HealthStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
