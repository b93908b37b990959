use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::theme::ThemeConfigDocument;

/// A row of the `catalogs` table.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub id: Uuid,
    // Selected with the row but not exposed.
    #[allow(dead_code)]
    pub organization_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub whatsapp_number: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub theme_config: Option<Json<ThemeConfigDocument>>,
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert or a partial update.
///
/// `None` means "leave the column alone": those keys are dropped from the
/// serialized patch and never reach the SQL statement. `description` may be
/// `Some(None)`, which writes NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_config: Option<ThemeConfigDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
