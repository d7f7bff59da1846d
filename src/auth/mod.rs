use axum::Router;

use crate::state::AppState;

pub mod claims;
pub mod dto;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

/// Registration and login; no token required.
pub fn public_router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Routes for any authenticated account.
pub fn protected_router() -> Router<AppState> {
    handlers::me_routes()
}

pub fn admin_router() -> Router<AppState> {
    handlers::admin_routes()
}
