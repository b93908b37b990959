// src/handlers/catalog.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::catalog::{
    Catalog, CatalogFields, CreateCatalogPayload, SlugAvailabilityQuery, SlugAvailabilityResponse,
    UpdateCatalogPayload,
};
use crate::dtos::storefront::PublicStorefront;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

fn require_text(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

// GET /catalogs
#[instrument(skip(state))]
pub async fn list_catalogs(State(state): State<AppState>) -> Result<Json<Vec<Catalog>>, AppError> {
    let catalogs = state.catalogs.get_all().await?;
    Ok(Json(catalogs))
}

// GET /catalogs/{id}
#[instrument(skip(state))]
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Catalog>, AppError> {
    let catalog = state.catalogs.get_one_by_id(id).await?;
    Ok(Json(catalog))
}

// POST /catalogs
#[instrument(skip(state, auth, payload))]
pub async fn create_catalog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateCatalogPayload>,
) -> Result<(StatusCode, Json<Catalog>), AppError> {
    require_text(&payload.name, "Catalog name is required")?;
    require_text(&payload.slug, "Catalog slug is required")?;
    require_text(&payload.whatsapp_number, "WhatsApp number is required")?;

    let catalog = state.catalogs.add(payload).await?;
    info!(user_id = %auth.user_id, email = ?auth.email, role = %auth.role, catalog_id = %catalog.id, "Catalog created");

    Ok((StatusCode::CREATED, Json(catalog)))
}

// PATCH /catalogs/{id}
#[instrument(skip(state, auth, changes))]
pub async fn update_catalog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(changes): Json<CatalogFields>,
) -> Result<Json<Catalog>, AppError> {
    if let Some(name) = &changes.name {
        require_text(name, "Catalog name cannot be empty")?;
    }
    if let Some(slug) = &changes.slug {
        require_text(slug, "Catalog slug cannot be empty")?;
    }

    let catalog = state
        .catalogs
        .update(UpdateCatalogPayload { id, changes })
        .await?;
    info!(user_id = %auth.user_id, catalog_id = %id, "Catalog updated");

    Ok(Json(catalog))
}

// DELETE /catalogs/{id}
#[instrument(skip(state, auth))]
pub async fn delete_catalog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalogs.remove(id).await?;
    info!(user_id = %auth.user_id, catalog_id = %id, "Catalog removed");

    Ok(StatusCode::NO_CONTENT)
}

// GET /catalogs/slug-availability?slug=
#[instrument(skip(state))]
pub async fn check_slug_availability(
    State(state): State<AppState>,
    Query(query): Query<SlugAvailabilityQuery>,
) -> Json<SlugAvailabilityResponse> {
    let available = state.catalogs.check_slug_availability(&query.slug).await;
    Json(SlugAvailabilityResponse {
        slug: query.slug,
        available,
    })
}

// GET /public/catalogs/{slug}
#[instrument(skip(state))]
pub async fn get_public_storefront(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicStorefront>, AppError> {
    let storefront = state.catalogs.get_public_storefront(&slug).await?;
    Ok(Json(storefront))
}
