#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Config-driven product page extraction.
//!
//! A run is one linear pass: load the page through a
//! [`commercia_scraper::PageSource`], parse it, apply the field extractors
//! in [`extract`] using the selectors of a [`page_def::PageDefinition`],
//! and hand back a [`ProductRecord`] ready for [`output::write_json`].
//! Any failure aborts the pass; there is no partial record.

pub mod extract;
pub mod output;
pub mod page_def;
pub mod parsing;
pub mod registry;

use commercia_product_models::ProductRecord;
use commercia_scraper::{PageSource, ScrapeError};
use scraper::Html;

use crate::page_def::PageDefinition;

/// Errors that can occur while extracting a product page.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Fetching the page or parsing a selector failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// A node the page is expected to contain was not found.
    #[error("Missing element for '{field}': no match for '{selector}'")]
    MissingElement {
        /// Record field being extracted.
        field: &'static str,
        /// Selector that matched nothing.
        selector: String,
    },

    /// Text that should hold a number could not be parsed.
    #[error("Invalid number for '{field}': '{value}'")]
    InvalidNumber {
        /// Record field being extracted.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A property table row had fewer than two cells.
    #[error("Malformed row {row} in property table {table}")]
    MalformedRow {
        /// Index of the table among the property tables.
        table: usize,
        /// Index of the row within the table.
        row: usize,
    },

    /// Fewer property tables than expected were found.
    #[error("Property table {index} not found")]
    MissingTable {
        /// Index of the missing table.
        index: usize,
    },

    /// A page definition was invalid or could not be found.
    #[error("Page definition error: {message}")]
    Definition {
        /// Description of what went wrong.
        message: String,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads the page from `source` and extracts a [`ProductRecord`] using the
/// selectors in `definition`. The record's `url` is `definition.url`.
///
/// # Errors
///
/// Returns [`ProductError`] if loading the page or any extraction step
/// fails.
pub async fn scrape_product(
    source: &impl PageSource,
    definition: &PageDefinition,
) -> Result<ProductRecord, ProductError> {
    let body = source.fetch().await?;
    log::info!(
        "[{}] Extracting product from {}",
        definition.id,
        source.location()
    );

    let document = Html::parse_document(&body);
    let record = extract::extract_product(&document, definition, &definition.url)?;

    log::info!(
        "[{}] Extracted '{}' ({} SKUs, {} properties, {} reviews)",
        definition.id,
        record.title,
        record.skus.len(),
        record.properties.len(),
        record.reviews.len()
    );
    Ok(record)
}
