//! Gateway Health API
//!
//! Public liveness endpoint, mounted outside the API base path.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub base_path: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub rules: usize,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    let now = Utc::now();
    let uptime_seconds = (now - state.started_at).num_seconds().max(0) as u64;

    Json(HealthReport {
        status: "ok",
        uptime_seconds,
        base_path: state.settings.base_path.clone(),
        chat_model: state.settings.chat_model.clone(),
        embedding_model: state.settings.embedding_model.clone(),
        rules: state.registry.rules().len(),
        timestamp: now,
    })
}
