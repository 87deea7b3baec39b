//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the event store can accept writes.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.store.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details. An unreadable log is reported
/// as degraded, since the recorder will replace it on the next write.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let writable = state.store.is_ready().await;
    let (readable, events) = match state.store.load().await {
        Ok(log) => (true, log.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read event log");
            (false, 0)
        }
    };

    let status = match (writable, readable) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    };

    let storage = if writable && readable { "ok" } else { "error" };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        store: state.store.describe(),
        events,
        max_events: state.recorder.max_events(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
