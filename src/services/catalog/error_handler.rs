use tracing::error;

use super::CatalogError;
use crate::store::{CodedFailure, StoreFailure};

const UNIQUE_VIOLATION: &str = "23505";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Turns a store failure into the user-facing catalog error.
///
/// The original failure is logged with `action` and then dropped; only the
/// returned error travels further.
pub fn handle_catalog_error(failure: StoreFailure, action: &str) -> CatalogError {
    error!(action, ?failure, "Catalog service failure");

    match failure {
        StoreFailure::Coded(coded) => classify_coded(&coded).unwrap_or(CatalogError::Unexpected),
        StoreFailure::Raised(err) => err,
        StoreFailure::Unrecognized(_) => CatalogError::Unexpected,
    }
}

fn classify_coded(failure: &CodedFailure) -> Option<CatalogError> {
    if failure.code == UNIQUE_VIOLATION {
        let mentions_slug = failure.message.contains("slug")
            || failure.details.as_deref().is_some_and(|d| d.contains("slug"));
        return Some(if mentions_slug {
            CatalogError::SlugInUse
        } else {
            CatalogError::Duplicate
        });
    }

    if failure.code == INSUFFICIENT_PRIVILEGE {
        return Some(CatalogError::PermissionDenied);
    }

    if failure.message.to_lowercase().contains("network") {
        return Some(CatalogError::Connection);
    }

    None
}
