//! Normalized collector output, one step before classification.

use std::collections::BTreeMap;

use crate::{ClusterHealth, ParameterValue};

/// The quantitative or boolean signal a normalizer extracts for the
/// classifier. The classifier maps this to a categorical status; the two
/// never get conflated inside a reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthSignal {
    /// An explicit healthy/unhealthy flag (e.g. the WLC HA pair state).
    Healthy(bool),
    /// A cluster health percentage in [0, 100] (the ISE deployment).
    Percentage(f64),
}

/// Normalized result of one successful fetch.
///
/// This is the partial status-record content a collector produces, plus the
/// health signal the classifier turns into a status. `detail` is only set
/// by the ISE collector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReading {
    pub parameters: BTreeMap<String, ParameterValue>,
    pub detail: Option<ClusterHealth>,
    pub signal: HealthSignal,
}

impl StatusReading {
    /// A reading with parameters and a signal but no cluster detail.
    pub fn new(parameters: BTreeMap<String, ParameterValue>, signal: HealthSignal) -> Self {
        Self {
            parameters,
            detail: None,
            signal,
        }
    }

    /// Attach a cluster health snapshot to the reading.
    pub fn with_detail(mut self, detail: ClusterHealth) -> Self {
        self.detail = Some(detail);
        self
    }
}
