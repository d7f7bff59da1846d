use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::{ProfileUpdate, User},
    db::StoreError,
};

/// Credential store consumed by the auth service.
///
/// Lookups fail with [`StoreError::NotFound`] when no row matches, `create`
/// fails with [`StoreError::Conflict`] when the email is already taken, and
/// `update`/`delete` fail with [`StoreError::NotFound`] for unknown ids.
/// `update_profile` and `set_active` touch only their own columns and return
/// the row as stored afterwards.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    async fn get_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn update(&self, user: &User) -> Result<(), StoreError>;
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
        updated_at: OffsetDateTime,
    ) -> Result<User, StoreError>;
    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        updated_at: OffsetDateTime,
    ) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError>;
}

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone_number, \
                            role, active, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, phone_number,
                               role, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.role)
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET email = $2, password_hash = $3, first_name = $4, last_name = $5,
                   phone_number = $6, role = $7, active = $8, updated_at = $9
             WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.role)
        .bind(user.active)
        .bind(user.updated_at)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
        updated_at: OffsetDateTime,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET first_name = COALESCE($2, first_name),
                   last_name = COALESCE($3, last_name),
                   phone_number = COALESCE($4, phone_number),
                   updated_at = $5
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.phone_number.as_deref())
        .bind(updated_at)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        updated_at: OffsetDateTime,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET active = $2, updated_at = $3 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .bind(updated_at)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }
}
