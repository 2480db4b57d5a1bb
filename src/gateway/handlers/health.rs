//! Liveness handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use super::super::state::AppState;
use super::super::types::{HealthStatus, RootStatus};

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Root status endpoint
///
/// Used by the hosting platform and the keep-alive prober.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service up", body = RootStatus, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn root_status(State(state): State<Arc<AppState>>) -> Json<RootStatus> {
    Json(RootStatus {
        status: format!("{} backend OK", state.shop_name),
        timestamp: now_rfc3339(),
        uptime: state.uptime_secs(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthStatus, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: now_rfc3339(),
    })
}
