use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    contents::{
        dto::{ContentRequest, PageQuery},
        errors::ContentError,
        repo_types::{Content, ContentType},
    },
    state::AppState,
};

// --- routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/contents", get(list_contents))
        .route("/contents/:id", get(get_content))
        .route("/content-types", get(list_content_types))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/contents", post(upload_content))
        .route("/admin/contents/:id", put(update_content).delete(delete_content))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ContentError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ContentError::InvalidInput(e.body_text()))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_contents(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<Content>>, ContentError> {
    let items = state.contents.list_contents(q.page, q.page_size).await?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Content>, ContentError> {
    Ok(Json(state.contents.get_content(id).await?))
}

#[instrument(skip(state))]
pub async fn list_content_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentType>>, ContentError> {
    Ok(Json(state.contents.list_content_types().await?))
}

/// POST /admin/contents, answers 201 with a Location header.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn upload_content(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<Content>), ContentError> {
    let input = body(payload)?.into();
    let content = state.contents.upload_content(input, user.id).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/contents/{}", content.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(content)))
}

#[instrument(skip(state, payload))]
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<Content>, ContentError> {
    let input = body(payload)?.into();
    Ok(Json(state.contents.update_content(id, input).await?))
}

#[instrument(skip(state))]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    state.contents.delete_content(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
