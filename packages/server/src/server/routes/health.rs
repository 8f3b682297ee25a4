use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: String,
}

/// Health check endpoint
///
/// Reports the active store backend. The game fails open on store errors,
/// so the process is healthy whenever it can answer.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        store: state.game.backend_name().to_string(),
    })
}
