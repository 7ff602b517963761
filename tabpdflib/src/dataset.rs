//! Core data structures for tabular datasets.
//!
//! A [`Dataset`] is the ephemeral tabular entity the whole pipeline revolves
//! around: an ordered list of column names plus an ordered sequence of rows,
//! each row one [`Cell`] per column. It is populated from an external source
//! (a CSV or JSON file, or built in code), serialized once to markup, and
//! discarded. No state is retained between serializations.

use serde::{Deserialize, Serialize};

/// A single cell value: text, or empty.
///
/// A null/absent value is `Empty` and renders as an empty cell rather than
/// raising an error. Serde round-trips through `Option<String>`, so JSON
/// `null` maps to `Empty`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Cell {
    /// Text content, escaped at serialization time
    Text(String),
    /// Absent value, rendered as an empty cell
    #[default]
    Empty,
}

impl Cell {
    /// Create a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Check whether this cell is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The cell content as a string slice, `""` for empty cells.
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Empty => "",
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => Cell::Text(s),
            None => Cell::Empty,
        }
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Text(s) => Some(s),
            Cell::Empty => None,
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// An ordered set of named columns plus an ordered sequence of rows.
///
/// Column names are order-significant; uniqueness is not required. Rows
/// carry one cell per column in the same order. Whether a mismatched row is
/// rejected or padded is decided at serialization time by
/// [`RaggedRows`](crate::options::RaggedRows).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, in display order
    pub columns: Vec<String>,
    /// Data rows, each one cell per column
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create a dataset with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builder: append a row.
    pub fn row<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        self.push_row(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Append a row.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::text("Widget").to_string(), "Widget");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_from_option() {
        assert_eq!(Cell::from(Some("x".to_string())), Cell::text("x"));
        assert_eq!(Cell::from(None::<String>), Cell::Empty);
    }

    #[test]
    fn test_cell_serde_null_is_empty() {
        let cell: Cell = serde_json::from_str("null").unwrap();
        assert!(cell.is_empty());
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Cell::text("9.99")).unwrap(),
            "\"9.99\""
        );
    }

    #[test]
    fn test_dataset_builder() {
        let dataset = Dataset::new(vec!["Name".to_string(), "Amount".to_string()])
            .row(["Widget", "9.99"])
            .row(["Gadget", "19.99"]);

        assert_eq!(dataset.width(), 2);
        assert_eq!(dataset.row_count(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.rows[1][0], Cell::text("Gadget"));
    }

    #[test]
    fn test_dataset_empty() {
        let dataset = Dataset::new(vec!["Name".to_string()]);
        assert!(dataset.is_empty());
        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.width(), 1);
    }

    #[test]
    fn test_duplicate_columns_allowed() {
        let dataset = Dataset::new(vec!["Name".to_string(), "Name".to_string()]);
        assert_eq!(dataset.width(), 2);
    }
}
