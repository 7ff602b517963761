//! HTML document assembly.
//!
//! Wraps serialized table markup in a complete standalone document: doctype,
//! charset, escaped title, and an embedded print-oriented stylesheet. The
//! result is what gets handed to the renderer.

use crate::dataset::Dataset;
use crate::options::TableOptions;
use crate::table::{dataset_to_html, escape_html};
use crate::Result;

/// Default stylesheet embedded in every document.
///
/// Kept deliberately small: readable on screen, sensible in print. Callers
/// layer their own rules on top via `extra_css`.
pub const DEFAULT_STYLE: &str = "\
body { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; color: #1a1a1a; margin: 0; }
h1 { font-size: 1.4em; margin: 0 0 0.75em 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #b0b0b0; padding: 6px 10px; text-align: left; }
thead th { background: #f0f0f0; font-weight: 600; }
tbody tr:nth-child(even) { background: #fafafa; }
";

/// Assemble a complete HTML document around a dataset.
///
/// The title is escaped and used for both `<title>` and the page heading.
/// `extra_css` is appended verbatim after [`DEFAULT_STYLE`] so callers can
/// override any default rule.
pub fn document_html(
    dataset: &Dataset,
    title: &str,
    extra_css: Option<&str>,
    table: &TableOptions,
) -> Result<String> {
    let table_html = dataset_to_html(dataset, table)?;
    let title = escape_html(title);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", title));
    out.push_str("<style>\n");
    out.push_str(DEFAULT_STYLE);
    if let Some(css) = extra_css {
        out.push_str(css);
        if !css.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", title));
    out.push_str(&table_html);
    out.push_str("</body>\n</html>\n");

    Ok(out)
}
