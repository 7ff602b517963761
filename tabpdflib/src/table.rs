//! Tabular-to-markup serializer.
//!
//! This module turns a [`Dataset`] into a well-formed HTML table: a header
//! section listing column names in order, followed by one row section per
//! input row with cell values in column order.
//!
//! The data flow is:
//! 1. Dataset (ordered columns + rows)
//! 2. Ragged-row policy applied per row
//! 3. Escaped `<table>` markup, ready for document assembly
//!
//! Serialization is a pure function of its inputs: the same dataset and
//! options always produce byte-identical output, and no state is retained
//! between invocations.

use crate::dataset::{Cell, Dataset};
use crate::error::TabpdfError;
use crate::options::{RaggedRows, TableOptions};
use crate::Result;

/// Escape HTML special characters in text content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Serialize a dataset to an HTML `<table>`.
///
/// The header lists column names in input order; each data row renders its
/// cells in column order. Empty cells render as `<td></td>`. All text goes
/// through [`escape_html`], so markup in cell values cannot break the
/// document.
///
/// An empty row sequence produces a table containing only the header. A row
/// whose cell count disagrees with the column count is handled per
/// [`RaggedRows`]: `Reject` returns [`TabpdfError::RowLength`], `Pad` pads
/// short rows with empty cells and truncates long rows.
pub fn dataset_to_html(dataset: &Dataset, options: &TableOptions) -> Result<String> {
    let width = dataset.width();
    let mut out = String::new();

    match &options.table_class {
        Some(class) => out.push_str(&format!("<table class=\"{}\">\n", escape_html(class))),
        None => out.push_str("<table>\n"),
    }

    out.push_str("<thead>\n<tr>");
    for column in &dataset.columns {
        out.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for (index, row) in dataset.rows.iter().enumerate() {
        let cells = normalize_row(row, width, index, options.ragged)?;
        out.push_str("<tr>");
        for cell in cells {
            out.push_str(&format!("<td>{}</td>", escape_html(cell.as_str())));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    Ok(out)
}

/// Apply the ragged-row policy, yielding exactly `width` cells.
fn normalize_row<'a>(
    row: &'a [Cell],
    width: usize,
    index: usize,
    policy: RaggedRows,
) -> Result<Vec<&'a Cell>> {
    if row.len() != width && policy == RaggedRows::Reject {
        return Err(TabpdfError::RowLength {
            row: index,
            expected: width,
            found: row.len(),
        });
    }

    static EMPTY: Cell = Cell::Empty;
    Ok((0..width).map(|i| row.get(i).unwrap_or(&EMPTY)).collect())
}
