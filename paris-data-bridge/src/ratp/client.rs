//! RATP API HTTP client.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::{GetAllDestinationsResponse, TransportType};

use super::error::RatpError;

/// Default base URL for the RATP API (v4).
pub(crate) const DEFAULT_BASE_URL: &str = "https://api-ratp.pierre-grimaud.fr/v4";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_LEN: usize = 500;

/// Configuration for the RATP client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatpConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Skip TLS hostname verification.
    ///
    /// Only meant for test environments behind intercepting proxies;
    /// leave disabled in production.
    pub accept_invalid_hostnames: bool,
}

impl Default for RatpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_hostnames: false,
        }
    }
}

impl RatpConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Relax TLS hostname verification.
    pub fn with_accept_invalid_hostnames(mut self, accept: bool) -> Self {
        self.accept_invalid_hostnames = accept;
        self
    }
}

/// Client for the RATP destinations API.
#[derive(Debug, Clone)]
pub struct RatpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RatpClient {
    /// Create a new RATP client.
    pub fn new(config: RatpConfig) -> Result<Self, RatpError> {
        if config.timeout_secs == 0 {
            return Err(RatpError::Config("timeout_secs must be positive".into()));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RatpError::Config(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RatpError::Config(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_hostnames(config.accept_invalid_hostnames)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// URL of the destinations resource for a line.
    ///
    /// The line id always lands in a single, percent-encoded path segment.
    /// `.` and `..` would be dropped by URL normalization, so they are rejected.
    pub fn destinations_url(
        &self,
        transport_type: TransportType,
        line_id: &str,
    ) -> Result<Url, RatpError> {
        if line_id.is_empty() || line_id == "." || line_id == ".." {
            return Err(RatpError::InvalidLine(line_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RatpError::Config("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["destinations", transport_type.path_segment(), line_id]);
        Ok(url)
    }

    /// Fetch all destinations served by a line.
    ///
    /// Failures are logged here; callers only need to decide what to do
    /// with the error.
    pub async fn fetch_destinations(
        &self,
        transport_type: TransportType,
        line_id: &str,
    ) -> Result<GetAllDestinationsResponse, RatpError> {
        let url = self
            .destinations_url(transport_type, line_id)
            .inspect_err(|e| error!(error = %e, "cannot build RATP API URL"))?;
        debug!(%url, "fetching destinations");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(%url, error = %e, "no response from RATP API");
                return Err(RatpError::Http(e));
            }
        };

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%url, status = status.as_u16(), %body, "RATP API returned an error");
            return Err(RatpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let destinations = parse_destinations(&body).inspect_err(|e| {
            error!(%url, error = %e, "malformed RATP API response");
        })?;

        debug!(
            %url,
            count = destinations.destinations().len(),
            "fetched destinations"
        );

        Ok(destinations)
    }
}

fn parse_destinations(body: &str) -> Result<GetAllDestinationsResponse, RatpError> {
    serde_json::from_str(body).map_err(|e| RatpError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_LEN).collect()),
    })
}
