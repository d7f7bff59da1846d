use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, Pagination, PublicUser, RegisterRequest, SetActiveRequest,
            UpdateProfileRequest,
        },
        errors::AuthError,
        extractors::CurrentUser,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id/active", put(set_active))
        .route("/admin/users/:id", delete(delete_user))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| AuthError::InvalidInput(e.body_text()))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let input = body(payload)?.into_input()?;
    let out = state.auth.register(input).await?;
    Ok(Json(out.into()))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let input = body(payload)?.into_input()?;
    let out = state.auth.login(input).await?;
    Ok(Json(out.into()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<PublicUser>, AuthError> {
    let update = body(payload)?.into();
    let user = state.auth.update_profile(user.id, update).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PublicUser>>, AuthError> {
    let users = state.auth.list_users(p.limit, p.offset).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> Result<Json<PublicUser>, AuthError> {
    let req = body(payload)?;
    let user = state.auth.set_active(id, req.active).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AuthError> {
    state.auth.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
