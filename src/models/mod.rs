pub mod catalog;
pub mod storefront;
pub mod theme;
