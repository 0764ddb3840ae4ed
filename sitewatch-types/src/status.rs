//! Categorical health status and parameter display values.

use core::fmt;

/// Categorical health of one piece of equipment.
///
/// Every `(Site, EquipmentKind)` entry carries exactly one of these at any
/// point in time. The refresh engine flips a source to [`Loading`] at the
/// start of a cycle, then commits the classified result ([`Online`] or
/// [`Warning`]) or falls back to [`Warning`] on a failed fetch.
///
/// [`Loading`]: HealthStatus::Loading
/// [`Online`]: HealthStatus::Online
/// [`Warning`]: HealthStatus::Warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthStatus {
    /// The source reported healthy telemetry on its last refresh.
    Online,
    /// Degraded, stale or never-wired telemetry.
    Warning,
    /// Hard failure reported by a source.
    ///
    /// Currently no wired source classifies into this state; it exists for
    /// sources that can distinguish outage from degradation.
    Error,
    /// A refresh cycle is in flight and no result has been committed yet.
    Loading,
    /// No information available at all.
    Unknown,
}

impl HealthStatus {
    /// Whether the equipment is known to be operating normally.
    pub fn is_online(&self) -> bool {
        matches!(self, HealthStatus::Online)
    }

    /// Whether the status calls for operator attention.
    pub fn needs_attention(&self) -> bool {
        matches!(self, HealthStatus::Warning | HealthStatus::Error)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Online => "Online",
            HealthStatus::Warning => "Warning",
            HealthStatus::Error => "Error",
            HealthStatus::Loading => "Loading",
            HealthStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Connectivity of a single cluster member as surfaced in a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl From<bool> for Connectivity {
    fn from(is_connected: bool) -> Self {
        if is_connected {
            Connectivity::Connected
        } else {
            Connectivity::Disconnected
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Connected => f.write_str("Connected"),
            Connectivity::Disconnected => f.write_str("Disconnected"),
        }
    }
}

/// One displayed parameter of a status record.
///
/// Parameters are either a plain display string (an access point count, an
/// HA token) or a value paired with a connectivity badge (a cluster node).
/// Rendering code switches on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterValue {
    /// A plain display value.
    Plain(String),
    /// A display value with an attached connectivity state.
    WithConnectivity {
        value: String,
        connectivity: Connectivity,
    },
}

impl ParameterValue {
    /// Create a plain display value.
    pub fn plain(value: impl Into<String>) -> Self {
        ParameterValue::Plain(value.into())
    }

    /// Create a value carrying a connectivity badge.
    pub fn with_connectivity(value: impl Into<String>, is_connected: bool) -> Self {
        ParameterValue::WithConnectivity {
            value: value.into(),
            connectivity: Connectivity::from(is_connected),
        }
    }

    /// The display string, regardless of variant.
    pub fn value(&self) -> &str {
        match self {
            ParameterValue::Plain(v) => v,
            ParameterValue::WithConnectivity { value, .. } => value,
        }
    }

    /// The connectivity badge, if this parameter carries one.
    pub fn connectivity(&self) -> Option<Connectivity> {
        match self {
            ParameterValue::Plain(_) => None,
            ParameterValue::WithConnectivity { connectivity, .. } => Some(*connectivity),
        }
    }
}
