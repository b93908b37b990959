use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::theme::ThemeConfigDocument;

/// JSON document returned by the `get_public_catalog` database function.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicCatalogDocument {
    #[serde(default)]
    pub catalog: Option<PublicCatalogHeader>,
    #[serde(default)]
    pub items: Option<Vec<PublicCatalogItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicCatalogHeader {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub whatsapp_number: String,
    #[serde(default)]
    pub theme_config: Option<ThemeConfigDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicCatalogItem {
    pub item_id: String,
    // Present in the view row; the storefront is already keyed by slug.
    #[serde(default)]
    #[allow(dead_code)]
    pub catalog_slug: String,
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub variant_attributes: Option<BTreeMap<String, String>>,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub is_featured: bool,
    // Not always an array; normalized by the storefront mapper.
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub in_stock: bool,
}
