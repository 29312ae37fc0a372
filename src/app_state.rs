//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ScanService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Scan orchestration and last-report access.
    pub scan_service: Arc<ScanService>,
}
