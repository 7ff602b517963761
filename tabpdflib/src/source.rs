//! Input loading and discovery.
//!
//! Datasets come from CSV or JSON files. CSV treats the first record as the
//! header; JSON accepts either an explicit `{"columns": [...], "rows":
//! [[...]]}` object or an array of flat records. For batch conversion,
//! [`discover_data_files`] walks a directory tree with include/exclude glob
//! patterns and returns matches in deterministic order.

use std::path::{Path, PathBuf};

use glob::Pattern;
use serde_json::Value;
use walkdir::WalkDir;

use crate::dataset::{Cell, Dataset};
use crate::error::TabpdfError;
use crate::Result;

/// Recognized input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-separated values, header in the first record
    Csv,
    /// JSON, either columns/rows object or array of records
    Json,
}

impl DataFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(DataFormat::Csv),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(TabpdfError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load a dataset from a CSV or JSON file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| TabpdfError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        DataFormat::Csv => parse_csv(&content, path),
        DataFormat::Json => parse_json(&content, path),
    }
}

/// Parse CSV text into a dataset.
///
/// The first record supplies the column names in file order. Quoted fields
/// may contain separators, newlines, and doubled quotes (`""`). Blank lines
/// are skipped. Empty fields become empty cells.
pub fn parse_csv(input: &str, path: &Path) -> Result<Dataset> {
    let records = read_records(input, path)?;
    let mut records = records.into_iter();

    let columns = records.next().ok_or_else(|| TabpdfError::CsvParse {
        path: path.to_path_buf(),
        line: 1,
        message: "missing header record".to_string(),
    })?;

    let rows = records
        .map(|record| record.into_iter().map(field_to_cell).collect())
        .collect();

    Ok(Dataset { columns, rows })
}

fn field_to_cell(field: String) -> Cell {
    if field.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field)
    }
}

/// Split CSV text into records of raw fields, tracking lines for errors.
fn read_records(input: &str, path: &Path) -> Result<Vec<Vec<String>>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0usize;
    let mut line = 1usize;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {} // handled by the '\n' that follows
            '\n' => {
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TabpdfError::CsvParse {
            path: path.to_path_buf(),
            line: quote_line,
            message: "unclosed quoted field".to_string(),
        });
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Parse JSON text into a dataset.
///
/// Accepts two shapes: an object `{"columns": [...], "rows": [[...]]}`, or
/// an array of flat records whose column order comes from the first
/// record's keys. Scalar values are stringified, `null` becomes an empty
/// cell, nested values are rejected.
pub fn parse_json(input: &str, path: &Path) -> Result<Dataset> {
    let value: Value = serde_json::from_str(input).map_err(|e| TabpdfError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => columns_rows_dataset(&map, path),
        Value::Array(records) => records_dataset(&records, path),
        _ => Err(json_error(
            path,
            "expected an object with \"columns\"/\"rows\" or an array of records",
        )),
    }
}

fn json_error(path: &Path, message: impl Into<String>) -> TabpdfError {
    TabpdfError::JsonParse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn columns_rows_dataset(map: &serde_json::Map<String, Value>, path: &Path) -> Result<Dataset> {
    let columns = map
        .get("columns")
        .and_then(Value::as_array)
        .ok_or_else(|| json_error(path, "missing \"columns\" array"))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| json_error(path, "column names must be strings"))
        })
        .collect::<Result<Vec<String>>>()?;

    let rows = map
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| json_error(path, "missing \"rows\" array"))?
        .iter()
        .map(|row| {
            let cells = row
                .as_array()
                .ok_or_else(|| json_error(path, "each row must be an array"))?;
            cells.iter().map(|v| value_to_cell(v, path)).collect()
        })
        .collect::<Result<Vec<Vec<Cell>>>>()?;

    Ok(Dataset { columns, rows })
}

fn records_dataset(records: &[Value], path: &Path) -> Result<Dataset> {
    let first = records
        .first()
        .and_then(Value::as_object)
        .ok_or_else(|| json_error(path, "cannot derive columns from an empty record array"))?;

    // Key order of the first record defines column order
    let columns: Vec<String> = first.keys().cloned().collect();

    let rows = records
        .iter()
        .map(|record| {
            let record = record
                .as_object()
                .ok_or_else(|| json_error(path, "each record must be an object"))?;
            columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(value) => value_to_cell(value, path),
                    None => Ok(Cell::Empty),
                })
                .collect()
        })
        .collect::<Result<Vec<Vec<Cell>>>>()?;

    Ok(Dataset { columns, rows })
}

fn value_to_cell(value: &Value, path: &Path) -> Result<Cell> {
    match value {
        Value::Null => Ok(Cell::Empty),
        Value::String(s) => Ok(Cell::text(s)),
        Value::Number(n) => Ok(Cell::text(n.to_string())),
        Value::Bool(b) => Ok(Cell::text(b.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(json_error(path, "nested values are not supported"))
        }
    }
}

/// Configuration for data-file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all data files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all data files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| TabpdfError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.include.push(pat);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| TabpdfError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it carries a recognized data extension, matches at
    /// least one include pattern (or include is empty), and matches no
    /// exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        if DataFormat::from_path(path).is_err() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if pattern.matches(&path_str) {
                return false;
            }
        }

        if self.include.is_empty() {
            return true;
        }

        self.include.iter().any(|p| p.matches(&path_str))
    }
}

/// Discover data files under a directory.
///
/// Walks the tree, skipping hidden directories, and returns matching files
/// sorted for deterministic batch output. A file path is returned as-is
/// when it matches the filter.
pub fn discover_data_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(TabpdfError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !name.starts_with('.');
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(files)
}
