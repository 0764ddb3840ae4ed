//! Deployment configuration: the fixed registration set and backend wiring.

use std::collections::BTreeMap;

use sitewatch_types::{
    ClusterHealth, EquipmentKind, HealthStatus, ParameterValue, Site, StatusRecord,
};

/// Default base URL of the telemetry backend.
pub const DEFAULT_BACKEND_ENDPOINT: &str = "http://localhost:5000";

/// One `(site, kind)` entry of the deployment and its registration-time
/// placeholder content.
#[derive(Debug, Clone)]
pub struct Registration {
    pub site: Site,
    pub kind: EquipmentKind,
    /// Static description shown on the equipment card; immutable after
    /// registration.
    pub description: String,
    pub initial_status: HealthStatus,
    pub parameters: BTreeMap<String, ParameterValue>,
    /// Empty cluster snapshot for the ISE kind, `None` otherwise.
    pub detail: Option<ClusterHealth>,
}

impl Registration {
    /// The placeholder record created for this entry at registry init.
    pub fn placeholder_record(&self) -> StatusRecord {
        let mut record = StatusRecord::new(self.initial_status, self.description.clone())
            .with_parameters(self.parameters.clone());
        if let Some(detail) = &self.detail {
            record = record.with_detail(detail.clone());
        }
        record
    }
}

/// The full registration set plus collector wiring.
///
/// The key set is fixed and small; nothing is discovered at runtime.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub registrations: Vec<Registration>,
    /// Base URL the wired collectors query.
    pub backend_endpoint: String,
}

impl DeploymentConfig {
    /// The reference two-campus deployment.
    ///
    /// Every site gets the four equipment kinds. Live telemetry is wired
    /// for Benguerir only (WLC and ISE); everything else stays at its
    /// registration default permanently, which is intentional placeholder
    /// behavior for equipment whose collectors are not deployed yet.
    pub fn campus() -> Self {
        let mut registrations = Vec::new();

        for site in Site::ALL {
            for kind in EquipmentKind::ALL {
                registrations.push(Registration {
                    site,
                    kind,
                    description: description_for(site, kind),
                    initial_status: initial_status_for(site, kind),
                    parameters: initial_parameters_for(site, kind),
                    detail: (kind == EquipmentKind::Ise).then(ClusterHealth::empty),
                });
            }
        }

        Self {
            registrations,
            backend_endpoint: DEFAULT_BACKEND_ENDPOINT.to_string(),
        }
    }

    /// Point the wired collectors at a different backend.
    pub fn with_backend_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.backend_endpoint = endpoint.into();
        self
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
            backend_endpoint: DEFAULT_BACKEND_ENDPOINT.to_string(),
        }
    }
}

fn description_for(site: Site, kind: EquipmentKind) -> String {
    match kind {
        EquipmentKind::Wlc => format!(
            "Wireless LAN controllers (WLC) centrally manage every WiFi access point on the {site} campus."
        ),
        EquipmentKind::Fortigate => {
            format!("The Fortigate firewall secures the {site} campus network.")
        }
        EquipmentKind::Panorama => format!(
            "Panorama supervises and controls all firewalls of the {site} campus."
        ),
        EquipmentKind::Ise => format!(
            "Cisco ISE handles user authentication and authorization on the {site} campus network."
        ),
    }
}

fn initial_status_for(site: Site, kind: EquipmentKind) -> HealthStatus {
    // Benguerir's ISE source refreshes right after start, so it registers
    // as Loading; every other entry starts at Warning until (and unless) a
    // collector reports in.
    if site == Site::Benguerir && kind == EquipmentKind::Ise {
        HealthStatus::Loading
    } else {
        HealthStatus::Warning
    }
}

fn initial_parameters_for(site: Site, kind: EquipmentKind) -> BTreeMap<String, ParameterValue> {
    let mut parameters = BTreeMap::new();
    if site == Site::Benguerir && kind == EquipmentKind::Wlc {
        parameters.insert("AP Count".to_string(), ParameterValue::plain("Loading..."));
        parameters.insert("Hot Standby".to_string(), ParameterValue::plain("Loading..."));
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_registers_both_sites_times_four_kinds() {
        let config = DeploymentConfig::campus();
        assert_eq!(config.registrations.len(), 8);
    }

    #[test]
    fn only_ise_entries_carry_cluster_detail() {
        for registration in DeploymentConfig::campus().registrations {
            match registration.kind {
                EquipmentKind::Ise => assert!(registration.detail.is_some()),
                _ => assert!(registration.detail.is_none()),
            }
        }
    }

    #[test]
    fn benguerir_wlc_placeholders() {
        let config = DeploymentConfig::campus();
        let wlc = config
            .registrations
            .iter()
            .find(|r| r.site == Site::Benguerir && r.kind == EquipmentKind::Wlc)
            .unwrap();

        assert_eq!(wlc.initial_status, HealthStatus::Warning);
        assert_eq!(wlc.parameters["AP Count"].value(), "Loading...");
        assert_eq!(wlc.parameters["Hot Standby"].value(), "Loading...");
    }

    #[test]
    fn descriptions_mention_their_site() {
        let config = DeploymentConfig::campus();
        for registration in &config.registrations {
            assert!(
                registration.description.contains(&registration.site.to_string()),
                "{} description should name the site",
                registration.kind
            );
        }
    }

    #[test]
    fn backend_endpoint_is_overridable() {
        let config = DeploymentConfig::campus().with_backend_endpoint("http://backend:5000");
        assert_eq!(config.backend_endpoint, "http://backend:5000");
    }
}
