//! Scan trigger request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ScanReport;

/// Trigger label used when the request does not name one.
pub const DEFAULT_HTTP_TRIGGER: &str = "http";

/// Optional body for `POST /api/v1/scans`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TriggerRequest {
    /// Free-form label recorded on the report (e.g. `"cron"`). Defaults
    /// to `"http"`.
    #[serde(default)]
    pub trigger: Option<String>,
}

impl TriggerRequest {
    /// Returns the trigger label, falling back to [`DEFAULT_HTTP_TRIGGER`].
    #[must_use]
    pub fn label(&self) -> &str {
        self.trigger
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_HTTP_TRIGGER)
    }
}

/// Response for a completed scan.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScanRunResponse {
    /// Always `200` for a completed scan.
    pub status_code: u16,
    /// Always `"Scan Complete!"`.
    pub message: String,
    /// Run summary.
    pub report: ScanReport,
}

impl ScanRunResponse {
    /// Wraps a finished report.
    #[must_use]
    pub fn complete(report: ScanReport) -> Self {
        Self {
            status_code: 200,
            message: "Scan Complete!".to_string(),
            report,
        }
    }
}
