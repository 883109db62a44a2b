//! Main HTTP Gateway Server.
//!
//! Nests the OpenAI-compatible routes under the configured base path and
//! serves them until the shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use mockai_core::ResponseRegistry;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::health_api;
use crate::openai_compat;

/// Static values the handlers report or obey.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_path: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub owned_by: String,
    pub chunk_delay: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_path: "/mock/v1".to_string(),
            chat_model: "mock-gpt-4".to_string(),
            embedding_model: "mock-text-embedding-ada-002".to_string(),
            owned_by: "tanzu-workshop".to_string(),
            chunk_delay: Duration::from_millis(50),
        }
    }
}

/// Application state shared across routes. Nothing in it changes after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<ResponseRegistry>,
    pub settings: Arc<GatewaySettings>,
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(registry: ResponseRegistry, settings: GatewaySettings) -> Self {
        Self {
            registry: Arc::new(registry),
            settings: Arc::new(settings),
            started_at: Utc::now(),
        }
    }
}

/// `""` for root mounting, otherwise `/segment[/segment]` without a trailing slash.
pub fn normalize_base_path(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    let api = Router::new()
        .route("/models", get(openai_compat::list_models))
        .route("/chat/completions", post(openai_compat::chat_completions))
        .route("/embeddings", post(openai_compat::create_embeddings))
        .route("/tools/:name", post(openai_compat::invoke_tool));

    let base = normalize_base_path(&state.settings.base_path);
    let app = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    app.route("/health", get(health_api::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: GatewayState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Gateway HTTP server stopped");
    Ok(())
}

/// Bind `addr` and serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!(
        addr = %listener.local_addr()?,
        base_path = %normalize_base_path(&state.settings.base_path),
        rules = state.registry.rules().len(),
        "Mock OpenAI API listening"
    );
    serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
