//! Health and ping endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Body of the ping endpoint.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the user store is reachable before returning OK.
/// Returns 503 Service Unavailable otherwise.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.users().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, backend = %state.users().backend(), "User store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Reply with the configured ping message.
///
/// GET /ping
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.config().ping_message.clone(),
    })
}
