use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{
    errors::AccessError,
    extractors::{bearer_token, CurrentUser},
};
use crate::state::AppState;

/// Rejects requests without a valid bearer token; on success the resolved user
/// is stored in the request extensions as [`CurrentUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        warn!(uri = %req.uri(), "missing or malformed Authorization header");
        return Err(AccessError::Unauthenticated);
    };

    let user = state
        .auth
        .validate_token(&token)
        .await
        .map_err(|_| AccessError::Unauthenticated)?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AccessError> {
    match req.extensions().get::<CurrentUser>() {
        None => return Err(AccessError::Unauthenticated),
        Some(CurrentUser(user)) if !user.is_admin() => {
            warn!(user_id = %user.id, uri = %req.uri(), "admin route denied");
            return Err(AccessError::Forbidden);
        }
        Some(_) => {}
    }
    Ok(next.run(req).await)
}
