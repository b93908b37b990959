use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::theme::{null_as_default, CatalogThemeConfig};

/// Catalog as exposed to the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub whatsapp_number: String,
    pub description: String,
    pub is_active: bool,
    pub theme_config: CatalogThemeConfig,
    pub created_at: DateTime<Utc>,
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogPayload {
    pub name: String,
    pub slug: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme_config: CatalogThemeConfig,
}

/// Writable catalog fields. Every field is optional so the same shape serves
/// creation and partial updates.
///
/// `description` distinguishes absent (leave unchanged) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub theme_config: Option<CatalogThemeConfig>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateCatalogPayload {
    pub id: Uuid,
    pub changes: CatalogFields,
}

impl From<CreateCatalogPayload> for CatalogFields {
    fn from(payload: CreateCatalogPayload) -> Self {
        Self {
            name: Some(payload.name),
            slug: Some(payload.slug),
            whatsapp_number: Some(payload.whatsapp_number),
            description: payload.description.map(Some),
            theme_config: Some(payload.theme_config),
            is_active: Some(true),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlugAvailabilityQuery {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct SlugAvailabilityResponse {
    pub slug: String,
    pub available: bool,
}
