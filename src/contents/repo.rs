use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Content, ContentRow, ContentType};
use crate::db::StoreError;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, content: &Content) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Content, StoreError>;
    /// Newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Content>, StoreError>;
    async fn update(&self, content: &Content) -> Result<(), StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn get_type(&self, type_name: &str) -> Result<ContentType, StoreError>;
    async fn list_types(&self) -> Result<Vec<ContentType>, StoreError>;
}

const SELECT_CONTENT: &str = r#"
    SELECT c.id, c.title, c.description, c.url,
           c.type AS type_name, ct.description AS type_description,
           c.is_free, c.created_at, c.created_by
      FROM contents c
      JOIN content_types ct ON c.type = ct.type_name
"#;

#[derive(Clone)]
pub struct PgContentRepository {
    db: PgPool,
}

impl PgContentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn create(&self, content: &Content) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO contents (id, title, description, url, type, is_free, created_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(content.id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.url)
        .bind(&content.content_type.type_name)
        .bind(content.is_free)
        .bind(content.created_at)
        .bind(content.created_by)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Content, StoreError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!("{SELECT_CONTENT} WHERE c.id = $1"))
            .bind(id)
            .fetch_one(&self.db)
            .await?;
        Ok(row.into())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Content>, StoreError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "{SELECT_CONTENT} ORDER BY c.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Content::from).collect())
    }

    async fn update(&self, content: &Content) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE contents
               SET title = $2, description = $3, url = $4, type = $5, is_free = $6
             WHERE id = $1
            "#,
        )
        .bind(content.id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.url)
        .bind(&content.content_type.type_name)
        .bind(content.is_free)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_type(&self, type_name: &str) -> Result<ContentType, StoreError> {
        let row = sqlx::query_as::<_, ContentType>(
            "SELECT type_name, description FROM content_types WHERE type_name = $1",
        )
        .bind(type_name)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_types(&self) -> Result<Vec<ContentType>, StoreError> {
        let rows = sqlx::query_as::<_, ContentType>(
            "SELECT type_name, description FROM content_types ORDER BY type_name",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
