use serde_json::Value;

use super::theme::{format_theme_for_persistence, parse_theme_config};
use super::CatalogError;
use crate::dtos::catalog::{Catalog, CatalogFields};
use crate::dtos::storefront::{ProductVariant, PublicStorefront, StorefrontInfo, StorefrontProduct};
use crate::models::catalog::{CatalogPatch, CatalogRow};
use crate::models::storefront::{PublicCatalogDocument, PublicCatalogItem};

/// Public storefront link for a slug.
pub fn public_url(base_url: &str, slug: &str) -> String {
    format!("{}/c/{}", base_url.trim_end_matches('/'), slug)
}

pub fn to_domain(row: CatalogRow, base_url: &str) -> Catalog {
    let theme_config = parse_theme_config(row.theme_config.as_ref().map(|json| &json.0));
    Catalog {
        id: row.id,
        public_url: public_url(base_url, &row.slug),
        name: row.name,
        slug: row.slug,
        whatsapp_number: row.whatsapp_number,
        description: row.description.unwrap_or_default(),
        is_active: row.is_active,
        theme_config,
        created_at: row.created_at,
    }
}

/// Maps only the fields that are present. The theme is formatted only when
/// the caller supplied one.
pub fn to_persistence(fields: CatalogFields) -> CatalogPatch {
    CatalogPatch {
        name: fields.name,
        slug: fields.slug,
        whatsapp_number: fields.whatsapp_number,
        description: fields.description,
        is_active: fields.is_active,
        theme_config: fields.theme_config.as_ref().map(format_theme_for_persistence),
        updated_at: None,
    }
}

pub fn to_public_storefront(
    document: Option<PublicCatalogDocument>,
) -> Result<PublicStorefront, CatalogError> {
    let document = document.ok_or(CatalogError::InvalidData)?;
    let catalog = document.catalog.ok_or(CatalogError::InvalidData)?;

    Ok(PublicStorefront {
        info: StorefrontInfo {
            name: catalog.name,
            description: catalog.description.unwrap_or_default(),
            whatsapp_number: catalog.whatsapp_number,
            theme: parse_theme_config(catalog.theme_config.as_ref()),
        },
        products: document
            .items
            .unwrap_or_default()
            .into_iter()
            .map(to_storefront_product)
            .collect(),
    })
}

fn to_storefront_product(item: PublicCatalogItem) -> StorefrontProduct {
    let images = match item.images {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let attributes = item.variant_attributes;
    StorefrontProduct {
        id: item.item_id,
        name: item.product_name,
        description: item.product_description.unwrap_or_default(),
        price: item.price,
        original_price: item.original_price,
        images,
        is_featured: item.is_featured,
        is_in_stock: item.in_stock,
        variant: item.variant_id.filter(|id| !id.is_empty()).map(|id| ProductVariant {
            id,
            attributes: attributes.unwrap_or_default(),
        }),
    }
}
