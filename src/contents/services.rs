use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

use super::{
    errors::ContentError,
    repo::ContentRepository,
    repo_types::{Content, ContentType},
};
use crate::db::StoreError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Editable fields of a content record.
#[derive(Debug, Clone)]
pub struct ContentInput {
    pub title: String,
    pub description: String,
    pub url: String,
    pub type_name: String,
    pub is_free: bool,
}

pub struct ContentService {
    repo: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    pub async fn upload_content(
        &self,
        input: ContentInput,
        created_by: Uuid,
    ) -> Result<Content, ContentError> {
        if created_by.is_nil() {
            return Err(ContentError::InvalidInput("creator ID is required".into()));
        }
        validate(&input)?;
        let content_type = self.resolve_type(&input.type_name).await?;

        let content = Content {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            url: input.url,
            content_type,
            is_free: input.is_free,
            created_at: OffsetDateTime::now_utc(),
            created_by,
        };
        self.repo
            .create(&content)
            .await
            .map_err(|e| persistence("create content", e))?;

        info!(
            content_id = %content.id,
            created_by = %created_by,
            kind = %content.content_type.type_name,
            "content uploaded"
        );
        Ok(content)
    }

    pub async fn get_content(&self, id: Uuid) -> Result<Content, ContentError> {
        if id.is_nil() {
            return Err(ContentError::InvalidInput("invalid content ID".into()));
        }
        self.repo.get_by_id(id).await.map_err(not_found_or_persistence)
    }

    /// One-based pagination; out-of-range arguments fall back to the first
    /// page and the default page size.
    pub async fn list_contents(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Content>, ContentError> {
        let page = if page < 1 { 1 } else { page };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        let offset = (page - 1).saturating_mul(page_size);

        self.repo
            .list(page_size, offset)
            .await
            .map_err(|e| persistence("list contents", e))
    }

    /// Replaces the editable fields; id, creation time and creator are kept.
    pub async fn update_content(
        &self,
        id: Uuid,
        input: ContentInput,
    ) -> Result<Content, ContentError> {
        let existing = self.get_content(id).await?;
        validate(&input)?;
        let content_type = self.resolve_type(&input.type_name).await?;

        let content = Content {
            title: input.title,
            description: input.description,
            url: input.url,
            content_type,
            is_free: input.is_free,
            ..existing
        };
        self.repo
            .update(&content)
            .await
            .map_err(not_found_or_persistence)?;

        info!(content_id = %id, "content updated");
        Ok(content)
    }

    pub async fn delete_content(&self, id: Uuid) -> Result<(), ContentError> {
        self.get_content(id).await?;
        self.repo
            .delete(id)
            .await
            .map_err(not_found_or_persistence)?;
        info!(content_id = %id, "content deleted");
        Ok(())
    }

    pub async fn list_content_types(&self) -> Result<Vec<ContentType>, ContentError> {
        self.repo
            .list_types()
            .await
            .map_err(|e| persistence("list content types", e))
    }

    async fn resolve_type(&self, type_name: &str) -> Result<ContentType, ContentError> {
        match self.repo.get_type(type_name).await {
            Ok(t) => Ok(t),
            Err(StoreError::NotFound) => Err(ContentError::InvalidInput(format!(
                "unknown content type {type_name:?}"
            ))),
            Err(e) => Err(persistence("get content type", e)),
        }
    }
}

fn validate(input: &ContentInput) -> Result<(), ContentError> {
    if input.title.trim().is_empty() {
        return Err(ContentError::InvalidInput("title is required".into()));
    }
    if input.url.trim().is_empty() {
        return Err(ContentError::InvalidInput("URL is required".into()));
    }
    if input.type_name.trim().is_empty() {
        return Err(ContentError::InvalidInput("content type is required".into()));
    }
    Ok(())
}

fn not_found_or_persistence(e: StoreError) -> ContentError {
    match e {
        StoreError::NotFound => ContentError::NotFound,
        other => persistence("content store", other),
    }
}

fn persistence(op: &str, e: StoreError) -> ContentError {
    error!(error = %e, op, "content store failure");
    ContentError::Persistence(e.to_string())
}
