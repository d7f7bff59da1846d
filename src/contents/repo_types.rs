use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Entry of the content-type taxonomy (`audio`, `live`, `video`, `vlog`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ContentType {
    pub type_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub is_free: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub created_by: Uuid,
}

/// Flat row of `contents` joined with `content_types`.
#[derive(Debug, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub type_name: String,
    pub type_description: String,
    pub is_free: bool,
    pub created_at: OffsetDateTime,
    pub created_by: Uuid,
}

impl From<ContentRow> for Content {
    fn from(r: ContentRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            url: r.url,
            content_type: ContentType {
                type_name: r.type_name,
                description: r.type_description,
            },
            is_free: r.is_free,
            created_at: r.created_at,
            created_by: r.created_by,
        }
    }
}
