use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{repo::PgUserRepository, services::AuthService},
    config::AppConfig,
    contents::{repo::PgContentRepository, services::ContentService},
    storage::{PgStorage, Storage},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub auth: Arc<AuthService>,
    pub contents: Arc<ContentService>,
}

impl AppState {
    /// Wires the Postgres-backed repositories over an open pool.
    pub fn init(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let auth = AuthService::new(Arc::new(PgUserRepository::new(db.clone())), &config.jwt)?;
        let contents = ContentService::new(Arc::new(PgContentRepository::new(db.clone())));
        let storage = Arc::new(PgStorage::new(db)) as Arc<dyn Storage>;

        Ok(Self::from_parts(config, storage, auth, contents))
    }

    pub fn from_parts(
        config: AppConfig,
        storage: Arc<dyn Storage>,
        auth: AuthService,
        contents: ContentService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            auth: Arc::new(auth),
            contents: Arc::new(contents),
        }
    }
}
