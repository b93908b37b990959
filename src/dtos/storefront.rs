use std::collections::BTreeMap;

use serde::Serialize;

use super::theme::CatalogThemeConfig;

/// Read-only projection served to storefront visitors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicStorefront {
    pub info: StorefrontInfo,
    pub products: Vec<StorefrontProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontInfo {
    pub name: String,
    pub description: String,
    pub whatsapp_number: String,
    pub theme: CatalogThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductVariant {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
}
