//! roster-watch server entry point.
//!
//! Wires the stats client, record store, and webhook into a scan service,
//! starts the optional scheduler, and serves the trigger API.

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use roster_watch::api;
use roster_watch::app_state::AppState;
use roster_watch::config::{LogFormat, StoreBackend, WatchConfig};
use roster_watch::domain::CharacterNames;
use roster_watch::engine::DiffEngine;
use roster_watch::notify::{DiscordWebhookSink, NotificationDispatcher};
use roster_watch::service::{ScanScheduler, ScanService};
use roster_watch::stats::SwgohHelpClient;
use roster_watch::store::{CharacterRecordStore, InMemoryRecordStore, PostgresRecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = WatchConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        seeds = config.guild_seeds.len(),
        "starting roster-watch"
    );

    // Build record store
    let store: Arc<dyn CharacterRecordStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let store = PostgresRecordStore::connect(
                &config.database_url,
                config.database_max_connections,
                std::time::Duration::from_secs(config.database_connect_timeout_secs),
            )
            .await
            .context("connecting to record store")?;
            store.migrate().await.context("running migrations")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory record store, every player is new after restart");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    // Build adapters
    let stats = Arc::new(SwgohHelpClient::new(
        &config.stats_api_base_url,
        config.http_timeout(),
    )?);
    let sink = Arc::new(DiscordWebhookSink::new(
        &config.webhook_url,
        config.http_timeout(),
    )?);

    let names = match &config.character_names_path {
        Some(path) => CharacterNames::from_json_file(path)?,
        None => CharacterNames::builtin(),
    };
    tracing::info!(characters = names.len(), "character names loaded");

    // Build service layer
    let engine = DiffEngine::new(config.notify_policy, Arc::new(names));
    let dispatcher = NotificationDispatcher::new(
        sink,
        config.notification_chunk_size,
        config.delivery_delay(),
    );
    let scan_service = Arc::new(ScanService::new(
        stats,
        store,
        engine,
        dispatcher,
        config.credentials.clone(),
        config.guild_seeds.clone(),
        config.fetch_batch_size,
    ));

    if let Some(period) = config.scan_interval() {
        let scheduler = ScanScheduler::new(Arc::clone(&scan_service), period);
        tokio::spawn(scheduler.run());
    }

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { scan_service });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
