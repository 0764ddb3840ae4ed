//! Health classification: quantitative signal in, categorical status out.

use sitewatch_types::{HealthSignal, HealthStatus};

/// Cluster health percentage above which the ISE source counts as Online.
///
/// Exactly 80% is still a Warning.
pub const ONLINE_THRESHOLD_PERCENT: f64 = 80.0;

/// Map a normalizer's health signal to a categorical status.
///
/// Neither signal ever classifies into `Error`: the source system treats a
/// total outage the same as "below threshold", so persistent fetch failure
/// surfaces as `Warning`. Faithful behavior, not an oversight.
pub fn classify(signal: HealthSignal) -> HealthStatus {
    match signal {
        HealthSignal::Healthy(true) => HealthStatus::Online,
        HealthSignal::Healthy(false) => HealthStatus::Warning,
        HealthSignal::Percentage(p) if p > ONLINE_THRESHOLD_PERCENT => HealthStatus::Online,
        HealthSignal::Percentage(_) => HealthStatus::Warning,
    }
}
