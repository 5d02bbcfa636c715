//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::format::{to_records, OfferRecord};
use crate::geo::ReferencePoint;
use crate::server::query::OffersQuery;
use crate::server::rate_limit::enforce_rate_limit;
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let rate_limiter = state.rate_limiter.clone();

    Router::new()
        .route("/api/offers", get(offers_handler))
        .route("/api/status", get(status_handler))
        .layer(axum::middleware::from_fn_with_state(
            rate_limiter,
            enforce_rate_limit,
        ))
        .layer(build_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            code: code.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::NoComparisonAddress => (StatusCode::BAD_REQUEST, "NO_COMPARISON_ADDRESS"),
            Error::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            Error::AddressNotFound(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ADDRESS_NOT_FOUND"),
            Error::ResolverUnavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, "GEOCODER_ERROR"),
            Error::UpstreamUnavailable(_) | Error::UpstreamSchemaMismatch(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        ApiError::new(status, code, err.to_string())
    }
}

/// Map a pipeline failure to the message shown to API clients
fn search_error(err: Error, reference: &ReferencePoint) -> ApiError {
    error!(error = %err, reference = reference.query(), "offer search failed");

    if err.is_resolver_failure() {
        let hint = if reference.is_city() {
            "Try explicitly entering an address"
        } else {
            "Try a different address"
        };
        let mut api_err = ApiError::from(err);
        api_err.error = format!("Failed to find address: {}. {}", reference.query(), hint);
        return api_err;
    }

    let mut api_err = ApiError::from(err);
    api_err.error = format!("Failed to fetch offers: {}", api_err.error);
    api_err
}

/// Ranked offers endpoint
///
/// GET /api/offers
async fn offers_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<OfferRecord>>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let query = OffersQuery::parse(&pairs, today)?;
    let reference = ReferencePoint::for_request(
        query.comparison_address.as_deref(),
        &query.criteria.destination_names,
    )?;

    let outcome = state
        .search
        .run(&query.criteria, &reference)
        .await
        .map_err(|e| search_error(e, &reference))?;

    Ok(Json(to_records(&outcome.offers)))
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Requests allowed per client per window
    pub rate_limit_calls: usize,
    /// Rate limit window in seconds
    pub rate_limit_period_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        rate_limit_calls: state.config.rate_limit.calls,
        rate_limit_period_secs: state.config.rate_limit.period_secs,
    })
}
