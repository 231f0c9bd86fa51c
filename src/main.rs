//! amm-history server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use amm_history::api;
use amm_history::app_state::AppState;
use amm_history::config::{HistoryConfig, LogFormat};
use amm_history::domain::{EventBus, FeedRegistry};
use amm_history::history::TokenDirectory;
use amm_history::service::HistoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = HistoryConfig::from_env()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        rescan = ?config.rescan,
        page_order = ?config.page_order,
        "starting amm-history"
    );

    // Build domain layer
    let registry = Arc::new(FeedRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let mut service = HistoryService::new(
        registry,
        event_bus,
        config.merge_options(),
        config.page_limits(),
    );
    if let Some(path) = &config.token_directory_path {
        let directory = TokenDirectory::from_json_file(path)
            .with_context(|| format!("loading token directory {}", path.display()))?;
        tracing::info!(tokens = directory.len(), path = %path.display(), "token directory loaded");
        service = service.with_token_resolver(Arc::new(directory));
    }

    // Build application state and router
    let app_state = AppState::new(Arc::new(service));
    let app = api::build_app(app_state, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
