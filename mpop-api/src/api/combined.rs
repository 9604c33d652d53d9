//! Combined demographic + movie series endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use mpop_common::models::{FusedYearRecord, Year};
use mpop_common::{join, YearRange};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::services::{fetch_demographics, fetch_movie_counts};
use crate::AppState;

/// Query parameters for GET /combinedData
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDataQuery {
    /// Country name, e.g. "Finland"
    pub country: String,
    /// Genre name, e.g. "Drama"
    pub genre: String,
    pub start_year: Year,
    pub end_year: Year,
    /// Indicator name or UN indicator code
    pub indicator: String,
}

/// Fused series keyed by year, ascending
pub type CombinedDataResponse = BTreeMap<Year, FusedYearRecord>;

/// GET /combinedData
///
/// Fetches both series for every year in the range concurrently (bounded per
/// source), then joins them on year. Ranges wider than the configured span
/// are rejected with 400. Years missing from either series are left out.
pub async fn get_combined_data(
    State(state): State<AppState>,
    Query(query): Query<CombinedDataQuery>,
) -> ApiResult<Json<CombinedDataResponse>> {
    let range = YearRange::new(query.start_year, query.end_year)?.capped(state.limits.max_years)?;

    let location_code = state.codes.location_code(&query.country);
    let language_code = state.codes.language_code(&query.country);
    let genre_code = state.codes.genre_code(&query.genre);
    let indicator_code = state.codes.indicator_code(&query.indicator);

    let (demographics, movies) = tokio::join!(
        fetch_demographics(
            Arc::clone(&state.demographics),
            location_code,
            indicator_code,
            range,
            state.limits.max_in_flight,
        ),
        fetch_movie_counts(
            Arc::clone(&state.movies),
            genre_code,
            language_code,
            range,
            state.limits.max_in_flight,
        ),
    );

    let combined: CombinedDataResponse = join(demographics, movies)
        .into_iter()
        .map(|record| (record.year, record))
        .collect();

    info!(
        country = %query.country,
        genre = %query.genre,
        start = range.start(),
        end = range.end(),
        years = combined.len(),
        "Fetched country and movie data"
    );

    Ok(Json(combined))
}
