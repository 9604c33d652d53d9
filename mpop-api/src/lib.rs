//! mpop-api library - movie popularity service
//!
//! Serves per-year records fusing UN population data with TMDB movie
//! counts for the charting frontend.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use mpop_common::CodeTables;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::services::{DemographicSource, FetchLimits, MovieCountSource};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Static name → code tables, built once at startup
    pub codes: Arc<CodeTables>,
    /// Per-year demographic response bodies
    pub demographics: Arc<dyn DemographicSource>,
    /// Per-year movie counts
    pub movies: Arc<dyn MovieCountSource>,
    /// Concurrency and range bounds for upstream fan-out
    pub limits: FetchLimits,
}

impl AppState {
    pub fn new(
        codes: CodeTables,
        demographics: Arc<dyn DemographicSource>,
        movies: Arc<dyn MovieCountSource>,
    ) -> Self {
        Self {
            codes: Arc::new(codes),
            demographics,
            movies,
            limits: FetchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/combinedData", get(api::get_combined_data))
        .route("/api/codeMappings", get(api::get_code_mappings))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the charting frontend
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid allowed_origin {:?}: {}", allowed_origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
