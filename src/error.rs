//! Error types with HTTP status code mapping.
//!
//! [`WatchError`] is the central error type for roster-watch. Each variant
//! carries the failure category used by the scan policy (fatal, skip the
//! player, skip the chunk) and maps to an HTTP status for the trigger API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "authentication failed: HTTP 401"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status               |
/// |-----------|------------------|---------------------------|
/// | 1000–1999 | Config / Request | 400 / 409 / 500           |
/// | 2000–2999 | Stats provider   | 502 Bad Gateway           |
/// | 3000–3999 | Record store     | 500 Internal Server Error |
/// | 4000–4999 | Webhook delivery | 502 Bad Gateway           |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    /// Sign-in to the stats provider failed. Fatal for the whole run.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A roster or character-stats request failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The stats provider returned a payload missing expected fields.
    #[error("unexpected payload shape: {0}")]
    DataShape(String),

    /// Reading character records from the store failed.
    #[error("record query failed: {0}")]
    StoreQuery(String),

    /// Writing a character record to the store failed.
    #[error("record write failed: {0}")]
    StoreWrite(String),

    /// The chat webhook rejected or failed to receive a message.
    #[error("webhook delivery failed: {0}")]
    Delivery(String),

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A string could not be parsed as an ally code.
    #[error("invalid ally code: {0}")]
    InvalidAllyCode(String),

    /// A scan was triggered while another one is still running.
    #[error("a scan is already in progress")]
    ScanInProgress,

    /// No scan has completed since startup.
    #[error("no scan has completed yet")]
    NoScanYet,

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WatchError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Config(_) => 1001,
            Self::InvalidAllyCode(_) => 1002,
            Self::ScanInProgress => 1003,
            Self::NoScanYet => 1004,
            Self::Auth(_) => 2001,
            Self::Fetch(_) => 2002,
            Self::DataShape(_) => 2003,
            Self::Internal(_) => 3000,
            Self::StoreQuery(_) => 3001,
            Self::StoreWrite(_) => 3002,
            Self::Delivery(_) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAllyCode(_) => StatusCode::BAD_REQUEST,
            Self::ScanInProgress => StatusCode::CONFLICT,
            Self::NoScanYet => StatusCode::NOT_FOUND,
            Self::Auth(_) | Self::Fetch(_) | Self::DataShape(_) | Self::Delivery(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) | Self::StoreQuery(_) | Self::StoreWrite(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short machine-readable category, used as a log and report field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Fetch(_) => "fetch",
            Self::DataShape(_) => "data_shape",
            Self::StoreQuery(_) => "store_query",
            Self::StoreWrite(_) => "store_write",
            Self::Delivery(_) => "delivery",
            Self::Config(_) => "config",
            Self::InvalidAllyCode(_) => "invalid_ally_code",
            Self::ScanInProgress => "scan_in_progress",
            Self::NoScanYet => "no_scan_yet",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for WatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_maps_to_bad_gateway() {
        let err = WatchError::Auth("HTTP 401".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.to_string(), "authentication failed: HTTP 401");
    }

    #[test]
    fn scan_in_progress_is_conflict() {
        assert_eq!(
            WatchError::ScanInProgress.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_errors_are_server_errors() {
        let query = WatchError::StoreQuery("timeout".to_string());
        let write = WatchError::StoreWrite("rejected".to_string());
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(query.error_code(), write.error_code());
    }

    #[test]
    fn into_response_sets_status() {
        let response = WatchError::NoScanYet.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn kind_is_stable() {
        assert_eq!(WatchError::DataShape(String::new()).kind(), "data_shape");
        assert_eq!(WatchError::Delivery(String::new()).kind(), "delivery");
    }
}
