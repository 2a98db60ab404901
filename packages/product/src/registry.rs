//! Page registry — loads every page definition from embedded TOML configs.
//!
//! Each `.toml` file in `packages/product/pages/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a page means adding a TOML
//! file and listing it below.

use crate::ProductError;
use crate::page_def::{PageDefinition, parse_page_toml};

/// TOML configs embedded at compile time.
const PAGE_TOMLS: &[(&str, &str)] = &[(
    "commercia_case",
    include_str!("../pages/commercia_case.toml"),
)];

/// Identifier of the page extracted when none is requested.
pub const DEFAULT_PAGE_ID: &str = "commercia_case";

/// Returns all configured page definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so
/// the registry tests catch this before release).
#[must_use]
pub fn all_pages() -> Vec<PageDefinition> {
    PAGE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_page_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a page definition by id.
///
/// # Errors
///
/// Returns [`ProductError::Definition`] if no page has the given id.
pub fn find_page(id: &str) -> Result<PageDefinition, ProductError> {
    all_pages()
        .into_iter()
        .find(|page| page.id == id)
        .ok_or_else(|| ProductError::Definition {
            message: format!("unknown page '{id}'"),
        })
}
