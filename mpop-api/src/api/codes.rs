//! Code mapping endpoint

use axum::{extract::State, Json};
use mpop_common::CodeTables;

use crate::AppState;

/// GET /api/codeMappings
///
/// Country, movie-language, genre and indicator tables the frontend uses
/// to populate its selectors.
pub async fn get_code_mappings(State(state): State<AppState>) -> Json<CodeTables> {
    tracing::debug!("Serving code mappings");
    Json(state.codes.as_ref().clone())
}
