//! Config-driven product page definition.
//!
//! A [`PageDefinition`] names the page to fetch, where to write the result,
//! and the CSS selectors that map its markup onto a
//! [`commercia_product_models::ProductRecord`]. Every selector has a default
//! matching the Commercia product layout, so a TOML file only has to spell
//! out the ones that differ.

use serde::Deserialize;

use crate::ProductError;

/// A complete product page definition, loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDefinition {
    /// Unique identifier (e.g., `"commercia_case"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// URL of the product page.
    pub url: String,
    /// File the JSON document is written to.
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    /// Currency symbol stripped from price text before parsing.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Glyph counted to score a review.
    #[serde(default = "default_star_glyph")]
    pub star_glyph: String,
    /// Literal heading removed from the description block.
    #[serde(default = "default_description_heading")]
    pub description_heading: String,
    /// Separator between breadcrumb entries.
    #[serde(default = "default_category_separator")]
    pub category_separator: String,
    /// CSS selectors for each extracted field.
    #[serde(default)]
    pub selectors: ProductSelectors,
}

fn default_output_filename() -> String {
    "produto.json".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_star_glyph() -> String {
    "\u{2605}".to_string()
}

fn default_description_heading() -> String {
    "Description".to_string()
}

fn default_category_separator() -> String {
    ">".to_string()
}

/// CSS selectors used by the field extractors.
///
/// SKU and review selectors are evaluated inside their card or box, and
/// `average_score` inside `comments`. Everything else is evaluated against
/// the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductSelectors {
    /// Page heading holding the product title.
    pub title: String,
    /// Brand name.
    pub brand: String,
    /// Breadcrumb trail.
    pub categories: String,
    /// Description block, heading included.
    pub description: String,
    /// Container of the SKU cards. Only the first match is used.
    pub skus_area: String,
    /// One SKU card inside `skus_area`.
    pub sku_card: String,
    /// SKU name inside a card. Optional.
    pub sku_name: String,
    /// Current price inside a card. Its presence marks the SKU available.
    pub sku_current_price: String,
    /// Previous price inside a card. Optional.
    pub sku_old_price: String,
    /// Matches the primary properties table first and the additional
    /// properties table second.
    pub property_tables: String,
    /// Reviews section.
    pub comments: String,
    /// Average score heading inside `comments`.
    pub average_score: String,
    /// One review entry.
    pub review_box: String,
    /// Reviewer name inside a review.
    pub review_username: String,
    /// Review date inside a review, kept as text.
    pub review_date: String,
    /// Star rating inside a review.
    pub review_stars: String,
    /// Review body inside a review.
    pub review_text: String,
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self {
            title: "h2#product_title".to_string(),
            brand: "div.brand".to_string(),
            categories: "nav.current-category".to_string(),
            description: "div.product-details".to_string(),
            skus_area: "div.skus-area".to_string(),
            sku_card: "div.card".to_string(),
            sku_name: "div.sku-name".to_string(),
            sku_current_price: "div.sku-current-price".to_string(),
            sku_old_price: "div.sku-old-price".to_string(),
            property_tables: "table".to_string(),
            comments: "div#comments".to_string(),
            average_score: "h4".to_string(),
            review_box: "div.review-box".to_string(),
            review_username: "span.review-username".to_string(),
            review_date: "span.review-date".to_string(),
            review_stars: "span.review-stars".to_string(),
            review_text: "p".to_string(),
        }
    }
}

impl PageDefinition {
    /// Returns a copy of this definition pointed at a different URL.
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        url.clone_into(&mut self.url);
        self
    }

    fn validate(&self) -> Result<(), ProductError> {
        let required = [
            ("id", &self.id),
            ("url", &self.url),
            ("output_filename", &self.output_filename),
            ("currency_symbol", &self.currency_symbol),
            ("star_glyph", &self.star_glyph),
            ("category_separator", &self.category_separator),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(ProductError::Definition {
                    message: format!("'{key}' must not be empty"),
                });
            }
        }
        Ok(())
    }
}

/// Parses a [`PageDefinition`] from a TOML string.
///
/// # Errors
///
/// Returns [`ProductError::Definition`] if the TOML is malformed, missing
/// required fields, or leaves a required value empty.
pub fn parse_page_toml(toml_str: &str) -> Result<PageDefinition, ProductError> {
    let def: PageDefinition =
        toml::de::from_str(toml_str).map_err(|e| ProductError::Definition {
            message: e.to_string(),
        })?;
    def.validate()?;
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commercia_case_toml() {
        let def = parse_page_toml(include_str!("../pages/commercia_case.toml")).unwrap();
        assert_eq!(def.id, "commercia_case");
        assert_eq!(def.output_filename, "produto.json");
        assert_eq!(def.currency_symbol, "$");
        assert_eq!(def.star_glyph, "\u{2605}");
        assert_eq!(def.selectors.title, "h2#product_title");
        assert_eq!(def.selectors.review_box, "div.review-box");
    }

    #[test]
    fn minimal_toml_falls_back_to_defaults() {
        let def = parse_page_toml(
            r#"
            id = "minimal"
            name = "Minimal"
            url = "https://example.com/product.html"
            "#,
        )
        .unwrap();
        assert_eq!(def.output_filename, "produto.json");
        assert_eq!(def.description_heading, "Description");
        assert_eq!(def.category_separator, ">");
        assert_eq!(def.selectors.skus_area, "div.skus-area");
    }

    #[test]
    fn partial_selector_table_keeps_other_defaults() {
        let def = parse_page_toml(
            r#"
            id = "custom"
            name = "Custom"
            url = "https://example.com/product.html"

            [selectors]
            title = "h1.name"
            "#,
        )
        .unwrap();
        assert_eq!(def.selectors.title, "h1.name");
        assert_eq!(def.selectors.brand, "div.brand");
    }

    #[test]
    fn rejects_missing_url() {
        let err = parse_page_toml(
            r#"
            id = "broken"
            name = "Broken"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ProductError::Definition { .. }));
    }

    #[test]
    fn rejects_empty_star_glyph() {
        let err = parse_page_toml(
            r#"
            id = "broken"
            name = "Broken"
            url = "https://example.com"
            star_glyph = ""
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("star_glyph"));
    }

    #[test]
    fn with_url_overrides_only_the_url() {
        let def = parse_page_toml(include_str!("../pages/commercia_case.toml"))
            .unwrap()
            .with_url("http://localhost:8080/product.html");
        assert_eq!(def.url, "http://localhost:8080/product.html");
        assert_eq!(def.id, "commercia_case");
    }
}
