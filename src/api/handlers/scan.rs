//! Scan handlers: trigger a run, read the last report.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ScanRunResponse, TriggerRequest};
use crate::app_state::AppState;
use crate::domain::ScanReport;
use crate::error::{ErrorResponse, WatchError};

/// `POST /scans`: Run one full scan and deliver its notifications.
///
/// # Errors
///
/// Returns [`WatchError::ScanInProgress`] if a scan is already running, or
/// [`WatchError::Auth`] if the stats provider rejects the credentials.
#[utoipa::path(
    post,
    path = "/api/v1/scans",
    tag = "Scans",
    summary = "Trigger a scan",
    description = "Signs in to the stats provider, scans every seeded guild, persists changed characters, and posts notifications to the webhook. Returns once delivery has finished.",
    request_body(content = TriggerRequest, description = "Optional trigger label"),
    responses(
        (status = 200, description = "Scan completed", body = ScanRunResponse),
        (status = 409, description = "Another scan is running", body = ErrorResponse),
        (status = 502, description = "Stats provider sign-in failed", body = ErrorResponse),
    )
)]
pub async fn trigger_scan(
    State(state): State<AppState>,
    body: Option<Json<TriggerRequest>>,
) -> Result<impl IntoResponse, WatchError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    let report = state.scan_service.run(request.label()).await?;
    Ok((StatusCode::OK, Json(ScanRunResponse::complete(report))))
}

/// `GET /scans/latest`: Report of the most recent completed scan.
///
/// # Errors
///
/// Returns [`WatchError::NoScanYet`] if no scan has completed since
/// startup.
#[utoipa::path(
    get,
    path = "/api/v1/scans/latest",
    tag = "Scans",
    summary = "Latest scan report",
    responses(
        (status = 200, description = "Last completed scan", body = ScanReport),
        (status = 404, description = "No scan has completed yet", body = ErrorResponse),
    )
)]
pub async fn latest_scan(State(state): State<AppState>) -> Result<Json<ScanReport>, WatchError> {
    state
        .scan_service
        .last_report()
        .await
        .map(Json)
        .ok_or(WatchError::NoScanYet)
}

/// Scan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scans", post(trigger_scan))
        .route("/scans/latest", get(latest_scan))
}
