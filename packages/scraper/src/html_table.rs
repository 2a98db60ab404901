//! HTML table extraction.
//!
//! Turns a `<table>` element into rows of trimmed cell text. A header row is
//! recognised only in first position: if the first `<tr>` holds `<th>`
//! cells it becomes row 0, and every remaining row is read for `<td>` cells
//! only.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::stripped_text;

static ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static HEADER_CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("valid selector"));
static DATA_CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// Extracts every row of `table` as a list of cell strings.
///
/// Rows come back in document order. A leading header row is included as
/// row 0; otherwise row 0 is the first data row.
#[must_use]
pub fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    let mut rows = table.select(&ROW_SEL);
    let Some(first) = rows.next() else {
        return Vec::new();
    };

    let mut out = Vec::new();

    let header = row_cells(first, &HEADER_CELL_SEL);
    if header.is_empty() {
        out.push(row_cells(first, &DATA_CELL_SEL));
    } else {
        out.push(header);
    }

    out.extend(rows.map(|tr| row_cells(tr, &DATA_CELL_SEL)));
    out
}

fn row_cells(row: ElementRef<'_>, cell_sel: &Selector) -> Vec<String> {
    row.select(cell_sel).map(stripped_text).collect()
}
