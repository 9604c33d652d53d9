//! TMDB discover API client
//!
//! Only the `total_results` count of the first page is used.

use async_trait::async_trait;
use mpop_common::models::Year;
use serde::Deserialize;
use std::time::Duration;

use super::{MovieCountSource, UpstreamError};

const USER_AGENT: &str = concat!("mpop-api/", env!("CARGO_PKG_VERSION"));

/// Subset of the `/3/discover/movie` response
#[derive(Debug, Deserialize)]
pub struct DiscoverResponse {
    /// Absent when TMDB has nothing to report
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl DiscoverResponse {
    pub fn movie_count(&self) -> u64 {
        self.total_results.unwrap_or(0)
    }
}

pub struct TmdbClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbClient {
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

    /// Query parameters for one (genre, language, year) discover request
    fn discover_query(
        &self,
        genre_code: &str,
        language_code: &str,
        year: Year,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("include_adult", "false".to_string()),
            ("include_video", "false".to_string()),
            ("language", "en-US".to_string()),
            ("page", "1".to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("with_original_language", language_code.to_string()),
            ("year", year.to_string()),
            ("with_genres", genre_code.to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }
        query
    }
}

#[async_trait]
impl MovieCountSource for TmdbClient {
    async fn fetch_movie_count(
        &self,
        genre_code: &str,
        language_code: &str,
        year: Year,
    ) -> Result<u64, UpstreamError> {
        let url = format!("{}/3/discover/movie", self.base_url);
        tracing::debug!(genre = %genre_code, language = %language_code, year, "Querying TMDB discover");

        let response = self
            .http_client
            .get(&url)
            .query(&self.discover_query(genre_code, language_code, year))
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status(status.as_u16(), error_text));
        }

        let discover: DiscoverResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(discover.movie_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_response_count() {
        let body = r#"{"page":1,"results":[],"total_pages":3,"total_results":57}"#;
        let parsed: DiscoverResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.movie_count(), 57);
    }

    #[test]
    fn test_missing_total_results_is_zero() {
        let parsed: DiscoverResponse = serde_json::from_str(r#"{"page":1}"#).unwrap();
        assert_eq!(parsed.movie_count(), 0);
    }

    #[test]
    fn test_discover_query_includes_key_when_configured() {
        let client =
            TmdbClient::new("https://api.themoviedb.org", Some("k".into()), Duration::from_secs(5))
                .unwrap();
        let query = client.discover_query("28", "fi", 2001);
        assert!(query.contains(&("with_genres", "28".to_string())));
        assert!(query.contains(&("with_original_language", "fi".to_string())));
        assert!(query.contains(&("year", "2001".to_string())));
        assert!(query.contains(&("api_key", "k".to_string())));

        let anonymous =
            TmdbClient::new("https://api.themoviedb.org", None, Duration::from_secs(5)).unwrap();
        assert!(!anonymous
            .discover_query("28", "fi", 2001)
            .iter()
            .any(|(name, _)| *name == "api_key"));
    }
}
