use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

/// Catalogue reads for any authenticated account.
pub fn read_router() -> Router<AppState> {
    handlers::read_routes()
}

/// Catalogue writes; mounted behind the admin gate.
pub fn write_router() -> Router<AppState> {
    handlers::write_routes()
}
