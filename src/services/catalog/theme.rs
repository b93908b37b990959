// Theme defaults and the conversions between the stored theme document and
// the resolved domain theme.
use crate::dtos::theme::{
    CatalogThemeConfig, SocialLinks, ThemeBehavior, ThemeBranding, ThemeColors, ThemeLayout,
};
use crate::models::theme::{
    BehaviorDocument, BrandingDocument, ColorsDocument, LayoutDocument, LayoutMode,
    SocialLinksDocument, ThemeConfigDocument,
};

pub struct ThemeDefaults {
    pub colors: ColorDefaults,
    pub branding: BrandingDefaults,
    pub layout: LayoutDefaults,
    pub behavior: BehaviorDefaults,
}

pub struct ColorDefaults {
    pub primary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

pub struct BrandingDefaults {
    pub show_cover: bool,
}

pub struct LayoutDefaults {
    pub mode: LayoutMode,
    pub products_per_page: u32,
}

pub struct BehaviorDefaults {
    pub display_price: bool,
    pub whatsapp_message: &'static str,
}

/// Values used for every required theme field the stored document leaves out.
pub static DEFAULT_THEME: ThemeDefaults = ThemeDefaults {
    colors: ColorDefaults {
        primary: "#000000",
        background: "#ffffff",
        text: "#1f2937",
    },
    branding: BrandingDefaults { show_cover: true },
    layout: LayoutDefaults {
        mode: LayoutMode::Grid,
        products_per_page: 20,
    },
    behavior: BehaviorDefaults {
        display_price: true,
        whatsapp_message: "Olá! Vi estes itens no catálogo:",
    },
};

fn resolve_colors(doc: Option<&ColorsDocument>) -> ThemeColors {
    let doc = doc.cloned().unwrap_or_default();
    ThemeColors {
        primary: doc
            .primary
            .unwrap_or_else(|| DEFAULT_THEME.colors.primary.to_owned()),
        background: doc
            .background
            .unwrap_or_else(|| DEFAULT_THEME.colors.background.to_owned()),
        text: doc
            .text
            .unwrap_or_else(|| DEFAULT_THEME.colors.text.to_owned()),
        secondary: doc.secondary,
    }
}

fn resolve_branding(doc: Option<&BrandingDocument>) -> ThemeBranding {
    let doc = doc.cloned().unwrap_or_default();
    ThemeBranding {
        show_cover: doc.show_cover.unwrap_or(DEFAULT_THEME.branding.show_cover),
        logo_url: doc.logo_url,
        cover_image_url: doc.cover_image_url,
    }
}

fn resolve_layout(doc: Option<&LayoutDocument>) -> ThemeLayout {
    let doc = doc.cloned().unwrap_or_default();
    ThemeLayout {
        mode: doc.mode.unwrap_or(DEFAULT_THEME.layout.mode),
        products_per_page: doc
            .products_per_page
            .unwrap_or(DEFAULT_THEME.layout.products_per_page),
        card_style: doc.card_style,
    }
}

fn resolve_behavior(doc: Option<&BehaviorDocument>) -> ThemeBehavior {
    let doc = doc.cloned().unwrap_or_default();
    ThemeBehavior {
        display_price: doc
            .display_price
            .unwrap_or(DEFAULT_THEME.behavior.display_price),
        whatsapp_message: doc
            .whatsapp_message
            .unwrap_or_else(|| DEFAULT_THEME.behavior.whatsapp_message.to_owned()),
        show_out_of_stock: doc.show_out_of_stock,
    }
}

/// Resolves a possibly partial (or missing) stored theme into a complete one.
pub fn parse_theme_config(doc: Option<&ThemeConfigDocument>) -> CatalogThemeConfig {
    CatalogThemeConfig {
        colors: resolve_colors(doc.and_then(|d| d.colors.as_ref())),
        branding: resolve_branding(doc.and_then(|d| d.branding.as_ref())),
        layout: resolve_layout(doc.and_then(|d| d.layout.as_ref())),
        behavior: resolve_behavior(doc.and_then(|d| d.behavior.as_ref())),
        social_links: doc
            .and_then(|d| d.social_links.as_ref())
            .map(|links| SocialLinks {
                instagram: links.instagram.clone(),
                facebook: links.facebook.clone(),
                website: links.website.clone(),
            }),
    }
}

/// Converts a resolved theme back into the stored document shape.
///
/// Required leaves are always written. Optional leaves the theme does not
/// set are left out of the document.
pub fn format_theme_for_persistence(theme: &CatalogThemeConfig) -> ThemeConfigDocument {
    ThemeConfigDocument {
        colors: Some(ColorsDocument {
            primary: Some(theme.colors.primary.clone()),
            background: Some(theme.colors.background.clone()),
            text: Some(theme.colors.text.clone()),
            secondary: theme.colors.secondary.clone(),
        }),
        branding: Some(BrandingDocument {
            show_cover: Some(theme.branding.show_cover),
            logo_url: theme.branding.logo_url.clone(),
            cover_image_url: theme.branding.cover_image_url.clone(),
        }),
        layout: Some(LayoutDocument {
            mode: Some(theme.layout.mode),
            products_per_page: Some(theme.layout.products_per_page),
            card_style: theme.layout.card_style,
        }),
        behavior: Some(BehaviorDocument {
            display_price: Some(theme.behavior.display_price),
            whatsapp_message: Some(theme.behavior.whatsapp_message.clone()),
            show_out_of_stock: theme.behavior.show_out_of_stock,
        }),
        social_links: theme.social_links.as_ref().map(|links| SocialLinksDocument {
            instagram: links.instagram.clone(),
            facebook: links.facebook.clone(),
            website: links.website.clone(),
        }),
    }
}
