//! HTTP client for the registry site

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, Url};
use tracing::debug;

use crate::{config::UpstreamConfig, errors::VehicleInfoError, models::RegistrationNumber};

/// Fetches registry pages, one GET per lookup and no retries
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build a client sending the configured user agent and referer
    pub fn new(config: &UpstreamConfig) -> Result<Self, VehicleInfoError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            VehicleInfoError::ConfigurationError {
                message: format!("Invalid upstream base URL {}: {}", config.base_url, e),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(VehicleInfoError::ConfigurationError {
                message: format!("Upstream base URL cannot hold a path: {}", base_url),
            });
        }

        let referer = config.referer();
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer).map_err(|e| VehicleInfoError::ConfigurationError {
                message: format!("Invalid referer {}: {}", referer, e),
            })?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(VehicleInfoError::ClientBuild)?;

        Ok(Self { client, base_url })
    }

    /// Page URL for `rc`: `{base_url}/rc-search/{rc}`
    pub fn lookup_url(&self, rc: &RegistrationNumber) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("rc-search").push(rc.as_str());
        }
        url
    }

    /// Fetch the page body; non-2xx statuses are errors
    pub async fn fetch_page(&self, rc: &RegistrationNumber) -> Result<String, VehicleInfoError> {
        let url = self.lookup_url(rc);
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
