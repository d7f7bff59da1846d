use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("content not found")]
    NotFound,
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Persistence(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "storage unavailable".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
