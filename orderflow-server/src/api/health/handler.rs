use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::time::Instant;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: DatabaseCheck,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    status: &'static str,
    latency_ms: u64,
}

/// GET /health - liveness plus a `SELECT 1` round trip
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let start = Instant::now();
    let db_ok = state.db.ping().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    if !db_ok {
        tracing::warn!("Health check: database unreachable");
    }

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if db_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database: DatabaseCheck {
                status: if db_ok { "ok" } else { "error" },
                latency_ms,
            },
        }),
    )
}
