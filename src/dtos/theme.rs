use serde::{Deserialize, Deserializer, Serialize};

use crate::models::theme::{CardStyle, LayoutMode};
use crate::services::catalog::theme::{parse_theme_config, DEFAULT_THEME};

/// Fully resolved storefront theme.
///
/// Deserializing a partial document fills missing required fields (and whole
/// missing or `null` sections) from [`DEFAULT_THEME`]; optional fields stay
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogThemeConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: ThemeColors,
    #[serde(default, deserialize_with = "null_as_default")]
    pub branding: ThemeBranding,
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: ThemeLayout,
    #[serde(default, deserialize_with = "null_as_default")]
    pub behavior: ThemeBehavior,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default = "default_text")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBranding {
    #[serde(default = "default_show_cover")]
    pub show_cover: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeLayout {
    #[serde(default = "default_mode")]
    pub mode: LayoutMode,
    #[serde(default = "default_products_per_page")]
    pub products_per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_style: Option<CardStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBehavior {
    #[serde(default = "default_display_price")]
    pub display_price: bool,
    #[serde(default = "default_whatsapp_message")]
    pub whatsapp_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_out_of_stock: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Default for CatalogThemeConfig {
    fn default() -> Self {
        parse_theme_config(None)
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        CatalogThemeConfig::default().colors
    }
}

impl Default for ThemeBranding {
    fn default() -> Self {
        CatalogThemeConfig::default().branding
    }
}

impl Default for ThemeLayout {
    fn default() -> Self {
        CatalogThemeConfig::default().layout
    }
}

impl Default for ThemeBehavior {
    fn default() -> Self {
        CatalogThemeConfig::default().behavior
    }
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_primary() -> String {
    DEFAULT_THEME.colors.primary.to_owned()
}

fn default_background() -> String {
    DEFAULT_THEME.colors.background.to_owned()
}

fn default_text() -> String {
    DEFAULT_THEME.colors.text.to_owned()
}

fn default_show_cover() -> bool {
    DEFAULT_THEME.branding.show_cover
}

fn default_mode() -> LayoutMode {
    DEFAULT_THEME.layout.mode
}

fn default_products_per_page() -> u32 {
    DEFAULT_THEME.layout.products_per_page
}

fn default_display_price() -> bool {
    DEFAULT_THEME.behavior.display_price
}

fn default_whatsapp_message() -> String {
    DEFAULT_THEME.behavior.whatsapp_message.to_owned()
}
