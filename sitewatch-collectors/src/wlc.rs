//! Wireless controller collector.
//!
//! The WLC backend exposes one route per site
//! (`GET /api/wlc/<site>`) returning the controller pair's high-availability
//! token and the number of joined access points:
//!
//! ```json
//! { "ha_status": "UP", "ap_count": "142" }
//! ```
//!
//! On failure the backend answers with a non-2xx status and an `error`
//! body; both are surfaced as [`CollectorError::Http`].

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use sitewatch_types::{HealthSignal, ParameterValue, Site, StatusReading};

use crate::CollectorError;

/// HA token the backend reports when the active-standby pair is up.
const HA_UP: &str = "UP";

/// Collector for one site's wireless controller pair.
#[derive(Debug, Clone)]
pub struct WlcCollector {
    client: Client,
    endpoint: String,
    site: Site,
}

impl WlcCollector {
    /// Create a new builder for configuring the collector.
    pub fn builder() -> WlcCollectorBuilder {
        WlcCollectorBuilder::default()
    }

    /// The site this collector is wired to.
    pub fn site(&self) -> Site {
        self.site
    }

    /// Fetch and normalize the controller telemetry.
    pub async fn collect(&self) -> Result<StatusReading, CollectorError> {
        let payload = self.fetch().await?;
        Ok(normalize(&payload))
    }

    async fn fetch(&self) -> Result<WlcPayload, CollectorError> {
        let url = format!("{}/api/wlc/{}", self.endpoint, self.site.slug());

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CollectorError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let payload: WlcPayload = response
            .json()
            .await
            .map_err(|e| CollectorError::MalformedPayload(e.to_string()))?;

        Ok(payload)
    }
}

/// Convert a raw WLC payload into display parameters and a health signal.
///
/// The pair counts as healthy exactly when the HA token is `"UP"`; any
/// other token (including `"DOWN"`) downgrades the signal.
fn normalize(payload: &WlcPayload) -> StatusReading {
    let mut parameters = std::collections::BTreeMap::new();
    parameters.insert(
        "AP Count".to_string(),
        ParameterValue::plain(&payload.ap_count),
    );
    parameters.insert(
        "Hot Standby".to_string(),
        ParameterValue::plain(&payload.ha_status),
    );

    StatusReading::new(parameters, HealthSignal::Healthy(payload.ha_status == HA_UP))
}

/// Builder for [`WlcCollector`].
#[derive(Debug, Default)]
pub struct WlcCollectorBuilder {
    endpoint: Option<String>,
    site: Option<Site>,
    timeout: Option<Duration>,
}

impl WlcCollectorBuilder {
    /// Set the backend base URL (e.g. "http://localhost:5000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the site whose controller pair to query (default: Benguerir).
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
    pub fn build(self) -> WlcCollector {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        WlcCollector {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            site: self.site.unwrap_or(Site::Benguerir),
        }
    }
}

/// Controller telemetry as reported by the backend.
///
/// The backend reads both values off the CLI, so `ap_count` arrives as a
/// string and is displayed verbatim.
#[derive(Debug, Deserialize)]
struct WlcPayload {
    ha_status: String,
    ap_count: String,
}
