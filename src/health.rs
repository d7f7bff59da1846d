use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.storage.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "OK" }))),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "Database connection failed" })),
            )
        }
    }
}
