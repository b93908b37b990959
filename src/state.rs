// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::catalog::CatalogService;
use crate::store::PgCatalogStore;

#[derive(Clone)]
pub struct AppState {
    pub catalogs: CatalogService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: &AppConfig) -> Self {
        let store = Arc::new(PgCatalogStore::new(db_pool));
        Self {
            catalogs: CatalogService::new(store, &config.public_base_url),
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
        }
    }
}
