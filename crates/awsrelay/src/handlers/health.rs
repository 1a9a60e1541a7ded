//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Reports the active backend and region

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: &'static str,
    pub region: String,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Backend summary.
///
/// Does not call AWS; a healthy response only means the server is up and
/// which backend it was started with.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        backend: state.backend.as_str(),
        region: state.config.region.clone(),
    })
}
