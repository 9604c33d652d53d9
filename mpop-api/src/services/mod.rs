//! Upstream data sources and the per-year fan-out over them
//!
//! The HTTP handlers only see the [`DemographicSource`] and
//! [`MovieCountSource`] traits; tests substitute in-memory sources.

pub mod fetch;
pub mod tmdb;
pub mod un_population;

pub use fetch::{fetch_demographics, fetch_movie_counts, FetchLimits};
pub use tmdb::TmdbClient;
pub use un_population::UnPopulationClient;

use async_trait::async_trait;
use mpop_common::models::Year;
use thiserror::Error;

/// Upstream fetch errors
///
/// Never reaches the HTTP caller: a failed year degrades to an empty result.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of raw demographic response bodies, one per (location, year)
#[async_trait]
pub trait DemographicSource: Send + Sync {
    /// Fetch the pipe-delimited body for a single year
    async fn fetch_year(
        &self,
        location_code: &str,
        indicator_code: &str,
        year: Year,
    ) -> Result<String, UpstreamError>;
}

/// Source of per-year movie counts
#[async_trait]
pub trait MovieCountSource: Send + Sync {
    /// Number of movies for (genre, original language) released in `year`
    async fn fetch_movie_count(
        &self,
        genre_code: &str,
        language_code: &str,
        year: Year,
    ) -> Result<u64, UpstreamError>;
}
