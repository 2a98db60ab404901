//! Text normalization for extracted fields.
//!
//! Each function takes the raw text of one node and turns it into the value
//! stored on the record. Numeric parse failures surface as
//! [`ProductError::InvalidNumber`] naming the field.

use crate::ProductError;

/// Parses a price such as `"$ 19.90"` by dropping the currency symbol and
/// all whitespace.
///
/// # Errors
///
/// Returns [`ProductError::InvalidNumber`] if what remains is not a number.
pub fn parse_price(
    text: &str,
    currency_symbol: &str,
    field: &'static str,
) -> Result<f64, ProductError> {
    let cleaned: String = text
        .replace(currency_symbol, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    cleaned.parse::<f64>().map_err(|_| ProductError::InvalidNumber {
        field,
        value: text.trim().to_string(),
    })
}

/// Counts how many times `glyph` appears in `text`.
#[must_use]
pub fn count_stars(text: &str, glyph: &str) -> u32 {
    if glyph.is_empty() {
        return 0;
    }
    u32::try_from(text.matches(glyph).count()).unwrap_or(u32::MAX)
}

/// Parses the numerator out of an `"Average score: 3.3/5"` heading.
///
/// # Errors
///
/// Returns [`ProductError::InvalidNumber`] if no `X/Y` token is present or
/// its numerator is not a number.
pub fn parse_average_score(text: &str) -> Result<f64, ProductError> {
    let invalid = || ProductError::InvalidNumber {
        field: "review_average_score",
        value: text.trim().to_string(),
    };

    let numerator = text
        .split_whitespace()
        .find(|token| token.contains('/'))
        .and_then(|token| token.split('/').next())
        .ok_or_else(invalid)?;

    numerator.parse::<f64>().map_err(|_| invalid())
}

/// Collapses a multi-line description block into one line.
///
/// The heading literal is removed along with leading and trailing newlines.
/// Every line is trimmed and all of them are joined with a single space, so a
/// blank line inside the block leaves a double space in the result.
#[must_use]
pub fn collapse_description(text: &str, heading: &str) -> String {
    let without_heading = if heading.is_empty() {
        text.to_string()
    } else {
        text.replace(heading, "")
    };

    without_heading
        .trim_matches('\n')
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Splits a breadcrumb trail into trimmed category names.
#[must_use]
pub fn split_categories(text: &str, separator: &str) -> Vec<String> {
    text.replace('\n', "")
        .split(separator)
        .map(|part| part.trim().to_string())
        .collect()
}
