//! System endpoints: health check and configured seeds.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Guild seeds the scanner walks.
#[derive(Debug, Serialize, ToSchema)]
struct SeedsResponse {
    seeds: Vec<String>,
}

/// `GET /config/seeds`: Configured guild seed ally codes.
#[utoipa::path(
    get,
    path = "/config/seeds",
    tag = "System",
    summary = "List guild seeds",
    description = "Returns the ally codes whose guilds are scanned, in scan order.",
    responses(
        (status = 200, description = "Seed ally codes", body = SeedsResponse),
    )
)]
pub async fn seeds_handler(State(state): State<AppState>) -> impl IntoResponse {
    let seeds = state
        .scan_service
        .seeds()
        .iter()
        .map(ToString::to_string)
        .collect();
    (StatusCode::OK, Json(SeedsResponse { seeds }))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/seeds", get(seeds_handler))
}
