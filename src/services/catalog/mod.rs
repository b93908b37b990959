//! Catalog access functions.
//!
//! Each method issues a single store call. Rows coming back are mapped to
//! domain objects; failures are logged and classified into [`CatalogError`].

pub mod error_handler;
pub mod mapper;
pub mod theme;

use std::sync::Arc;

use chrono::Utc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::dtos::catalog::{Catalog, CatalogFields, CreateCatalogPayload, UpdateCatalogPayload};
use crate::dtos::storefront::PublicStorefront;
use crate::store::{CatalogStore, StoreFailure};
use error_handler::handle_catalog_error;

/// Shortest slug worth asking the store about.
pub const MIN_SLUG_LEN: usize = 3;

/// User-facing catalog errors (pt-BR).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Este link personalizado já está em uso. Por favor, escolha outro.")]
    SlugInUse,
    #[error("Já existe um catálogo com estes dados.")]
    Duplicate,
    #[error("Você não tem permissão para realizar alterações nos catálogos.")]
    PermissionDenied,
    #[error("Erro de conexão. Verifique sua internet.")]
    Connection,
    #[error("Catálogo não encontrado.")]
    NotFound,
    #[error("Dados do catálogo inválidos.")]
    InvalidData,
    #[error("{0}")]
    Other(String),
    #[error("Ocorreu um erro inesperado ao processar o catálogo.")]
    Unexpected,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    base_url: Arc<str>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, base_url: &str) -> Self {
        Self {
            store,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Catalog>, CatalogError> {
        match self.store.list().await {
            Ok(rows) => Ok(rows
                .into_iter()
                .map(|row| mapper::to_domain(row, &self.base_url))
                .collect()),
            Err(failure) => Err(handle_catalog_error(failure, "getAll")),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_one_by_id(&self, id: Uuid) -> Result<Catalog, CatalogError> {
        match self.store.find_by_id(id).await {
            Ok(row) => Ok(mapper::to_domain(row, &self.base_url)),
            Err(failure) if failure.is_row_not_found() => Err(handle_catalog_error(
                StoreFailure::Raised(CatalogError::NotFound),
                "getOneById",
            )),
            Err(failure) => Err(handle_catalog_error(failure, "getOneById")),
        }
    }

    /// Creates a catalog. New catalogs always start active.
    #[instrument(skip(self, payload), fields(slug = %payload.slug))]
    pub async fn add(&self, payload: CreateCatalogPayload) -> Result<Catalog, CatalogError> {
        let patch = mapper::to_persistence(CatalogFields::from(payload));

        match self.store.insert(patch).await {
            Ok(row) => Ok(mapper::to_domain(row, &self.base_url)),
            Err(failure) => Err(handle_catalog_error(failure, "add")),
        }
    }

    /// Applies a partial update; columns absent from the payload are untouched.
    #[instrument(skip(self, payload), fields(id = %payload.id))]
    pub async fn update(&self, payload: UpdateCatalogPayload) -> Result<Catalog, CatalogError> {
        let mut patch = mapper::to_persistence(payload.changes);
        patch.updated_at = Some(Utc::now());

        match self.store.update(payload.id, patch).await {
            Ok(row) => Ok(mapper::to_domain(row, &self.base_url)),
            Err(failure) => Err(handle_catalog_error(failure, "update")),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> Result<(), CatalogError> {
        self.store
            .delete(id)
            .await
            .map_err(|failure| handle_catalog_error(failure, "remove"))
    }

    /// `true` only when the store confirms no catalog uses `slug`. Short slugs
    /// and any failure count as unavailable.
    #[instrument(skip(self))]
    pub async fn check_slug_availability(&self, slug: &str) -> bool {
        if slug.chars().count() < MIN_SLUG_LEN {
            return false;
        }

        match self.store.count_by_slug(slug).await {
            Ok(count) => count == 0,
            Err(failure) => {
                warn!(?failure, slug, "Failed to check slug availability");
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_public_storefront(&self, slug: &str) -> Result<PublicStorefront, CatalogError> {
        match self.store.public_catalog(slug).await {
            Ok(document) => mapper::to_public_storefront(document).map_err(|err| {
                handle_catalog_error(StoreFailure::Raised(err), "getPublicStorefront")
            }),
            Err(failure) => Err(handle_catalog_error(failure, "getPublicStorefront")),
        }
    }
}
