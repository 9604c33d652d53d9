//! Concurrent per-year fetching
//!
//! Each year's request runs on its own spawned task, with at most
//! `max_in_flight` of them outstanding per source (`buffer_unordered`). All
//! of them are awaited before any parsing happens. Each year owns one result
//! slot, pre-filled with the degraded value, so a failed or panicked task
//! simply leaves its slot at "no data" instead of failing the whole range.

use futures::stream::{self, StreamExt};
use mpop_common::config::{DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MAX_YEAR_SPAN};
use mpop_common::models::{DemographicYearFact, MovieYearFact, Year};
use mpop_common::{assemble, YearRange};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, warn};

use super::{DemographicSource, MovieCountSource, UpstreamError};

/// Bounds applied to one /combinedData query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    /// Concurrent upstream requests per source
    pub max_in_flight: usize,
    /// Widest accepted year range
    pub max_years: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_CONCURRENT_REQUESTS,
            max_years: DEFAULT_MAX_YEAR_SPAN,
        }
    }
}

type YearOutcome<T> = (Year, Result<Result<T, UpstreamError>, JoinError>);

/// Run `fetch` for every year in `range`, at most `max_in_flight` at a time
///
/// Tasks are only spawned once a slot frees up, so neither the number of
/// live tasks nor the number of open requests exceeds the bound.
async fn fan_out<T, F, Fut>(range: YearRange, max_in_flight: usize, fetch: F) -> Vec<YearOutcome<T>>
where
    T: Send + 'static,
    F: Fn(Year) -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>> + Send + 'static,
{
    stream::iter(range.years())
        .map(|year| {
            let task = tokio::spawn(fetch(year));
            async move { (year, task.await) }
        })
        .buffer_unordered(max_in_flight.max(1))
        .collect()
        .await
}

/// Fetch and assemble one demographic fact per year in `range`
///
/// Returns exactly `range.len()` facts in ascending year order. Years whose
/// fetch failed carry the zero-valued fact.
pub async fn fetch_demographics(
    source: Arc<dyn DemographicSource>,
    location_code: &str,
    indicator_code: &str,
    range: YearRange,
    max_in_flight: usize,
) -> Vec<DemographicYearFact> {
    let outcomes = fan_out(range, max_in_flight, |year| {
        let source = Arc::clone(&source);
        let location = location_code.to_string();
        let indicator = indicator_code.to_string();
        async move { source.fetch_year(&location, &indicator, year).await }
    })
    .await;

    let mut bodies: BTreeMap<Year, Option<String>> = range.years().map(|y| (y, None)).collect();
    let mut failed = 0usize;

    for (year, outcome) in outcomes {
        match outcome {
            Ok(Ok(body)) => {
                bodies.insert(year, Some(body));
            }
            Ok(Err(e)) => {
                failed += 1;
                warn!(location = %location_code, year, error = %e, "Demographic fetch failed, using empty year");
            }
            Err(e) => {
                failed += 1;
                warn!(location = %location_code, year, error = %e, "Demographic fetch task aborted");
            }
        }
    }

    debug!(
        location = %location_code,
        years = range.len(),
        failed,
        "Demographic fetches complete"
    );

    bodies
        .into_iter()
        .map(|(year, body)| assemble(location_code, year, body.as_deref().unwrap_or("")))
        .collect()
}

/// Fetch one movie count per year in `range`
///
/// Returns exactly `range.len()` facts in ascending year order. Years whose
/// fetch failed report a count of 0.
pub async fn fetch_movie_counts(
    source: Arc<dyn MovieCountSource>,
    genre_code: &str,
    language_code: &str,
    range: YearRange,
    max_in_flight: usize,
) -> Vec<MovieYearFact> {
    let outcomes = fan_out(range, max_in_flight, |year| {
        let source = Arc::clone(&source);
        let genre = genre_code.to_string();
        let language = language_code.to_string();
        async move { source.fetch_movie_count(&genre, &language, year).await }
    })
    .await;

    let mut counts: BTreeMap<Year, u64> = range.years().map(|y| (y, 0)).collect();
    let mut failed = 0usize;

    for (year, outcome) in outcomes {
        match outcome {
            Ok(Ok(count)) => {
                counts.insert(year, count);
            }
            Ok(Err(e)) => {
                failed += 1;
                warn!(genre = %genre_code, year, error = %e, "Movie count fetch failed, using 0");
            }
            Err(e) => {
                failed += 1;
                warn!(genre = %genre_code, year, error = %e, "Movie count fetch task aborted");
            }
        }
    }

    debug!(
        genre = %genre_code,
        language = %language_code,
        years = range.len(),
        failed,
        "Movie count fetches complete"
    );

    counts
        .into_iter()
        .map(|(year, movie_count)| MovieYearFact {
            genre: genre_code.to_string(),
            year,
            country: language_code.to_string(),
            movie_count,
        })
        .collect()
}
