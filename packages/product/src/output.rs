//! JSON output for a [`ProductRecord`].
//!
//! The document is pretty-printed with 2-space indentation and written as
//! UTF-8 with non-ASCII characters left unescaped.

use std::path::Path;

use commercia_product_models::ProductRecord;

use crate::ProductError;

/// Serializes `record` as an indented JSON document.
///
/// # Errors
///
/// Returns [`ProductError::Json`] if serialization fails.
pub fn to_json(record: &ProductRecord) -> Result<String, ProductError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Writes `record` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ProductError`] if serialization or the write fails.
pub fn write_json(record: &ProductRecord, path: &Path) -> Result<(), ProductError> {
    let json = to_json(record)?;
    std::fs::write(path, json)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
