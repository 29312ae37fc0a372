//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; the OpenAPI document is
//! served at `/api-docs/openapi.json`.

pub mod dto;
pub mod handlers;

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::domain::{
    DeliveryReport, FailureScope, GuildNotifications, GuildScanResult, Notification, ScanFailure,
    ScanReport,
};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document for the trigger API.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "roster-watch",
        description = "Guild roster change detector: trigger scans and read their reports."
    ),
    paths(
        handlers::system::health_handler,
        handlers::system::seeds_handler,
        handlers::scan::trigger_scan,
        handlers::scan::latest_scan,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        dto::TriggerRequest,
        dto::ScanRunResponse,
        ScanReport,
        GuildScanResult,
        GuildNotifications,
        Notification,
        ScanFailure,
        FailureScope,
        DeliveryReport,
    )),
    tags(
        (name = "System", description = "Health and configuration"),
        (name = "Scans", description = "Scan trigger and reports"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{AllyCode, CharacterNames, GuildRoster};
    use crate::engine::{DiffEngine, NotifyPolicy};
    use crate::error::WatchError;
    use crate::notify::{MockNotificationSink, NotificationDispatcher};
    use crate::service::ScanService;
    use crate::stats::{AccessToken, Credentials, MockStatsClient};
    use crate::store::InMemoryRecordStore;

    fn seed() -> AllyCode {
        let Ok(code) = AllyCode::parse("111-222-333") else {
            panic!("valid ally code");
        };
        code
    }

    fn state(stats: MockStatsClient) -> AppState {
        let mut sink = MockNotificationSink::new();
        sink.expect_deliver().returning(|_, _| Ok(()));
        let service = ScanService::new(
            Arc::new(stats),
            Arc::new(InMemoryRecordStore::new()),
            DiffEngine::new(NotifyPolicy::default(), Arc::new(CharacterNames::builtin())),
            NotificationDispatcher::new(Arc::new(sink), 20, Duration::ZERO),
            Credentials {
                username: "kel".to_string(),
                password: "pw".to_string(),
                client_id: "abc".to_string(),
                client_secret: "123".to_string(),
            },
            vec![seed()],
            10,
        );
        AppState {
            scan_service: Arc::new(service),
        }
    }

    fn healthy_provider() -> MockStatsClient {
        let mut stats = MockStatsClient::new();
        stats
            .expect_authenticate()
            .returning(|_| Ok(AccessToken::new("t")));
        stats.expect_fetch_guild_roster().returning(|_, _| {
            Ok(vec![GuildRoster {
                guild_name: "Rebel Scum".to_string(),
                members: Vec::new(),
            }])
        });
        stats
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let Ok(request) = builder.body(body) else {
            panic!("request build failed");
        };
        let Ok(response) = app.clone().oneshot(request).await;
        response
    }

    async fn json(response: Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_router().with_state(state(MockStatsClient::new()));
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn seeds_are_listed() {
        let app = build_router().with_state(state(MockStatsClient::new()));
        let response = send(&app, Method::GET, "/config/seeds", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json(response).await["seeds"],
            serde_json::json!(["111222333"])
        );
    }

    #[tokio::test]
    async fn latest_before_any_scan_is_not_found() {
        let app = build_router().with_state(state(MockStatsClient::new()));
        let response = send(&app, Method::GET, "/api/v1/scans/latest", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"]["code"], 1004);
    }

    #[tokio::test]
    async fn trigger_runs_scan_and_stores_report() {
        let app = build_router().with_state(state(healthy_provider()));

        let response = send(&app, Method::POST, "/api/v1/scans", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["message"], "Scan Complete!");
        assert_eq!(body["report"]["trigger"], "http");
        assert_eq!(body["report"]["guilds_scanned"], 1);

        let latest = send(&app, Method::GET, "/api/v1/scans/latest", None).await;
        assert_eq!(latest.status(), StatusCode::OK);
        assert_eq!(json(latest).await["run_id"], body["report"]["run_id"]);
    }

    #[tokio::test]
    async fn trigger_label_comes_from_body() {
        let app = build_router().with_state(state(healthy_provider()));
        let response = send(
            &app,
            Method::POST,
            "/api/v1/scans",
            Some(r#"{"trigger":"cron"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["report"]["trigger"], "cron");
    }

    #[tokio::test]
    async fn auth_failure_is_bad_gateway() {
        let mut stats = MockStatsClient::new();
        stats
            .expect_authenticate()
            .returning(|_| Err(WatchError::Auth("HTTP 401".to_string())));
        let app = build_router().with_state(state(stats));

        let response = send(&app, Method::POST, "/api/v1/scans", None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json(response).await["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn openapi_document_lists_scan_paths() {
        let app = build_router().with_state(state(MockStatsClient::new()));
        let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json(response).await;
        assert!(doc["paths"]["/api/v1/scans"].is_object());
        assert!(doc["paths"]["/api/v1/scans/latest"].is_object());
    }
}
