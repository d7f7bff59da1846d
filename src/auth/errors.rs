use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Reasons a bearer token is rejected by [`JwtKeys::verify`](super::jwt::JwtKeys::verify).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Outcome classes of the register / login / validate flows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("user already exists")]
    AlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user is not active")]
    InactiveAccount,
    #[error("invalid token")]
    InvalidToken,
    #[error("{0}")]
    NotFound(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::AlreadyExists => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InactiveAccount | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            // storage and crypto details stay in the logs
            Self::Persistence(_) => "storage unavailable".to_string(),
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}

/// Rejections produced by the access middleware.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("unauthorized")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
