//! UN population data portal client

use async_trait::async_trait;
use mpop_common::models::Year;
use std::time::Duration;

use super::{DemographicSource, UpstreamError};

const USER_AGENT: &str = concat!("mpop-api/", env!("CARGO_PKG_VERSION"));

/// Client for `/v1/data/indicators/{indicator}/locations/{location}`
pub struct UnPopulationClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UnPopulationClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Single-year CSV export URL
    pub fn year_url(&self, location_code: &str, indicator_code: &str, year: Year) -> String {
        format!(
            "{}/v1/data/indicators/{}/locations/{}/start/{}/end/{}?pagingInHeader=true&format=csv",
            self.base_url, indicator_code, location_code, year, year
        )
    }
}

#[async_trait]
impl DemographicSource for UnPopulationClient {
    async fn fetch_year(
        &self,
        location_code: &str,
        indicator_code: &str,
        year: Year,
    ) -> Result<String, UpstreamError> {
        let url = self.year_url(location_code, indicator_code, year);
        tracing::debug!(location = %location_code, indicator = %indicator_code, year, "Querying UN data portal");

        let mut request = self.http_client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status(status.as_u16(), error_text));
        }

        response
            .text()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_url() {
        let client = UnPopulationClient::new(
            "https://population.un.org/dataportalapi/api/",
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.year_url("246", "46", 2000),
            "https://population.un.org/dataportalapi/api/v1/data/indicators/46/locations/246/start/2000/end/2000?pagingInHeader=true&format=csv"
        );
    }
}
