use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

/// Liveness of the backing store, as reported by `GET /api/health`.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn health_check(&self) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn health_check(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("postgres ping")?;
        Ok(())
    }
}
