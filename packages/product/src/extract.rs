//! Field extractors for a product page.
//!
//! Each rule selects a node (or node set) from the parsed document, pulls
//! its text, normalizes it, and fills one field of the
//! [`ProductRecord`]. Only SKU sub-fields are optional; every other node
//! is expected on the page and its absence aborts extraction with
//! [`ProductError::MissingElement`].
//!
//! Title, brand and review text are taken as they appear in the markup.
//! SKU names are trimmed.

use commercia_product_models::{ProductRecord, Property, Review, Sku};
use commercia_scraper::html_table::table_rows;
use commercia_scraper::{element_text, parse_selector, select_first};
use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};

use crate::ProductError;
use crate::page_def::{PageDefinition, ProductSelectors};
use crate::parsing::{
    collapse_description, count_stars, parse_average_score, parse_price, split_categories,
};

/// Position of the primary properties table among `property_tables` matches.
const PRIMARY_TABLE: usize = 0;
/// Position of the additional properties table among `property_tables` matches.
const ADDITIONAL_TABLE: usize = 1;

/// A parsed selector that remembers its source text for error messages.
struct Rule {
    raw: String,
    selector: Selector,
}

impl Rule {
    fn compile(raw: &str) -> Result<Self, ProductError> {
        Ok(Self {
            raw: raw.to_owned(),
            selector: parse_selector(raw)?,
        })
    }

    fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        select_first(scope, &self.selector)
    }

    fn require<'a>(
        &self,
        scope: ElementRef<'a>,
        field: &'static str,
    ) -> Result<ElementRef<'a>, ProductError> {
        self.first(scope).ok_or_else(|| ProductError::MissingElement {
            field,
            selector: self.raw.clone(),
        })
    }

    fn all<'a, 'b>(&'b self, scope: ElementRef<'a>) -> Select<'a, 'b> {
        scope.select(&self.selector)
    }
}

/// Every selector of a [`ProductSelectors`], compiled once per page.
struct Rules {
    title: Rule,
    brand: Rule,
    categories: Rule,
    description: Rule,
    skus_area: Rule,
    sku_card: Rule,
    sku_name: Rule,
    sku_current_price: Rule,
    sku_old_price: Rule,
    property_tables: Rule,
    comments: Rule,
    average_score: Rule,
    review_box: Rule,
    review_username: Rule,
    review_date: Rule,
    review_stars: Rule,
    review_text: Rule,
}

impl Rules {
    fn compile(selectors: &ProductSelectors) -> Result<Self, ProductError> {
        Ok(Self {
            title: Rule::compile(&selectors.title)?,
            brand: Rule::compile(&selectors.brand)?,
            categories: Rule::compile(&selectors.categories)?,
            description: Rule::compile(&selectors.description)?,
            skus_area: Rule::compile(&selectors.skus_area)?,
            sku_card: Rule::compile(&selectors.sku_card)?,
            sku_name: Rule::compile(&selectors.sku_name)?,
            sku_current_price: Rule::compile(&selectors.sku_current_price)?,
            sku_old_price: Rule::compile(&selectors.sku_old_price)?,
            property_tables: Rule::compile(&selectors.property_tables)?,
            comments: Rule::compile(&selectors.comments)?,
            average_score: Rule::compile(&selectors.average_score)?,
            review_box: Rule::compile(&selectors.review_box)?,
            review_username: Rule::compile(&selectors.review_username)?,
            review_date: Rule::compile(&selectors.review_date)?,
            review_stars: Rule::compile(&selectors.review_stars)?,
            review_text: Rule::compile(&selectors.review_text)?,
        })
    }
}

/// Runs every field extractor against `document`.
///
/// `url` is recorded verbatim as the record's source URL.
///
/// # Errors
///
/// Returns [`ProductError`] if a selector is invalid, a required node is
/// missing, a number fails to parse, or a property row is malformed.
pub fn extract_product(
    document: &Html,
    definition: &PageDefinition,
    url: &str,
) -> Result<ProductRecord, ProductError> {
    let rules = Rules::compile(&definition.selectors)?;
    let root = document.root_element();

    let title = extract_text(root, &rules.title, "title")?;
    let brand = extract_text(root, &rules.brand, "brand")?;
    log::debug!("Title '{title}', brand '{brand}'");

    let categories = split_categories(
        &element_text(rules.categories.require(root, "categories")?),
        &definition.category_separator,
    );
    log::debug!("Categories: {}", categories.join(" > "));

    let description = collapse_description(
        &element_text(rules.description.require(root, "description")?),
        &definition.description_heading,
    );

    let skus = extract_skus(root, &rules, definition)?;
    log::debug!("Extracted {} SKUs", skus.len());

    let properties = extract_properties(root, &rules)?;
    log::debug!("Extracted {} properties", properties.len());

    let comments = rules.comments.require(root, "reviews")?;
    let review_average_score = parse_average_score(&element_text(
        rules
            .average_score
            .require(comments, "review_average_score")?,
    ))?;

    let reviews = extract_reviews(root, &rules, definition)?;
    log::debug!(
        "Extracted {} reviews (average {review_average_score})",
        reviews.len()
    );

    Ok(ProductRecord {
        title,
        brand,
        categories,
        description,
        skus,
        properties,
        review_average_score,
        reviews,
        url: url.to_owned(),
    })
}

/// Text of a required node, kept as it appears in the markup.
fn extract_text(
    scope: ElementRef<'_>,
    rule: &Rule,
    field: &'static str,
) -> Result<String, ProductError> {
    Ok(element_text(rule.require(scope, field)?))
}

fn extract_skus(
    root: ElementRef<'_>,
    rules: &Rules,
    definition: &PageDefinition,
) -> Result<Vec<Sku>, ProductError> {
    let area = rules.skus_area.require(root, "skus")?;
    rules
        .sku_card
        .all(area)
        .map(|card| extract_sku(card, rules, &definition.currency_symbol))
        .collect()
}

/// Reads one SKU card. Every sub-field is optional.
fn extract_sku(
    card: ElementRef<'_>,
    rules: &Rules,
    currency_symbol: &str,
) -> Result<Sku, ProductError> {
    let name = rules
        .sku_name
        .first(card)
        .map(|el| element_text(el).trim().to_owned());

    let current_price = rules
        .sku_current_price
        .first(card)
        .map(|el| parse_price(&element_text(el), currency_symbol, "current_price"))
        .transpose()?;

    let old_price = rules
        .sku_old_price
        .first(card)
        .map(|el| parse_price(&element_text(el), currency_symbol, "old_price"))
        .transpose()?;

    Ok(Sku::new(name, old_price, current_price))
}

fn extract_properties(
    root: ElementRef<'_>,
    rules: &Rules,
) -> Result<Vec<Property>, ProductError> {
    let tables: Vec<ElementRef<'_>> = rules.property_tables.all(root).collect();

    let primary = tables
        .get(PRIMARY_TABLE)
        .ok_or(ProductError::MissingTable {
            index: PRIMARY_TABLE,
        })?;
    let additional = tables
        .get(ADDITIONAL_TABLE)
        .ok_or(ProductError::MissingTable {
            index: ADDITIONAL_TABLE,
        })?;

    let primary_rows = table_rows(*primary).into_iter().enumerate();
    // The additional table's first row is its column header.
    let additional_rows = table_rows(*additional).into_iter().enumerate().skip(1);

    primary_rows
        .map(|(row, cells)| row_to_property(cells, PRIMARY_TABLE, row))
        .chain(
            additional_rows.map(|(row, cells)| row_to_property(cells, ADDITIONAL_TABLE, row)),
        )
        .collect()
}

fn row_to_property(
    cells: Vec<String>,
    table: usize,
    row: usize,
) -> Result<Property, ProductError> {
    let mut cells = cells.into_iter();
    match (cells.next(), cells.next()) {
        (Some(label), Some(value)) => Ok(Property { label, value }),
        _ => Err(ProductError::MalformedRow { table, row }),
    }
}

fn extract_reviews(
    root: ElementRef<'_>,
    rules: &Rules,
    definition: &PageDefinition,
) -> Result<Vec<Review>, ProductError> {
    rules
        .review_box
        .all(root)
        .map(|review_box| extract_review(review_box, rules, &definition.star_glyph))
        .collect()
}

fn extract_review(
    review_box: ElementRef<'_>,
    rules: &Rules,
    star_glyph: &str,
) -> Result<Review, ProductError> {
    let stars = rules.review_stars.require(review_box, "reviews.score")?;

    Ok(Review {
        name: extract_text(review_box, &rules.review_username, "reviews.name")?,
        data: extract_text(review_box, &rules.review_date, "reviews.data")?,
        score: count_stars(&element_text(stars), star_glyph),
        text: extract_text(review_box, &rules.review_text, "reviews.text")?,
    })
}
