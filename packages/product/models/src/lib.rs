#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Product record types produced by the product page extractor.
//!
//! A [`ProductRecord`] is built once from a parsed page, serialized once to
//! JSON, and then discarded. Field order here is the key order of the
//! emitted JSON document.

use serde::{Deserialize, Serialize};

/// Everything extracted from a single product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Page heading text.
    pub title: String,
    /// Brand name shown next to the title.
    pub brand: String,
    /// Breadcrumb path, outermost category first.
    pub categories: Vec<String>,
    /// Description block collapsed to a single line.
    pub description: String,
    /// Purchasable variants in page order.
    pub skus: Vec<Sku>,
    /// Primary properties followed by additional properties.
    pub properties: Vec<Property>,
    /// Numerator of the "Average score: X/5" heading.
    pub review_average_score: f64,
    /// Customer reviews in page order.
    pub reviews: Vec<Review>,
    /// URL the page was fetched from.
    pub url: String,
}

/// A purchasable product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    /// Variant name, if the card shows one.
    pub name: Option<String>,
    /// Struck-through price, if any.
    pub old_price: Option<f64>,
    /// Price the variant currently sells for.
    pub current_price: Option<f64>,
    /// `true` iff the card carries a current price.
    pub available: bool,
}

impl Sku {
    /// Builds a SKU, deriving availability from the presence of a current
    /// price.
    #[must_use]
    pub const fn new(
        name: Option<String>,
        old_price: Option<f64>,
        current_price: Option<f64>,
    ) -> Self {
        Self {
            name,
            old_price,
            available: current_price.is_some(),
            current_price,
        }
    }
}

/// A single label/value row from one of the property tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// First cell of the row.
    pub label: String,
    /// Second cell of the row.
    pub value: String,
}

/// One customer review box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer name.
    pub name: String,
    /// Review date exactly as printed on the page.
    pub data: String,
    /// Number of filled stars.
    pub score: u32,
    /// Review body.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_without_current_price_is_unavailable() {
        let sku = Sku::new(Some("Small".to_string()), Some(29.9), None);
        assert!(!sku.available);
        assert!(sku.current_price.is_none());
    }

    #[test]
    fn sku_with_current_price_is_available() {
        let sku = Sku::new(None, None, Some(19.9));
        assert!(sku.available);
    }

    #[test]
    fn serializes_sku_with_nulls_in_field_order() {
        let sku = Sku::new(None, None, None);
        let json = serde_json::to_string(&sku).unwrap();
        assert_eq!(
            json,
            r#"{"name":null,"old_price":null,"current_price":null,"available":false}"#
        );
    }
}
