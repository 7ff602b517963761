//! # tabpdflib
//!
//! Turn rows of named columns into print-ready HTML tables and PDF reports.
//!
//! ## Overview
//!
//! The library implements one recurring pipeline: build or load a tabular
//! dataset, serialize it to escaped HTML table markup, wrap it in a
//! standalone document, and hand that document to an external render
//! service that answers with PDF bytes. PDF production itself is delegated
//! through the [`Renderer`] trait; the bundled [`HttpRenderer`] speaks to a
//! Chromium conversion service over HTTP.
//!
//! ## Features
//!
//! - **Order-preserving serialization**: column names and cell values render
//!   exactly in input order, with HTML special characters escaped
//! - **CSV and JSON input**: header-first CSV, or JSON as columns/rows or
//!   an array of records
//! - **Explicit ragged-row policy**: reject mismatched rows with a
//!   structured error, or pad them
//! - **Batch conversion**: walk a directory with glob filters and convert
//!   every data file, collecting per-file failures
//!
//! ## Example
//!
//! ```rust
//! use tabpdflib::{dataset_to_html, Dataset, TableOptions};
//!
//! let dataset = Dataset::new(vec!["Name".into(), "Amount".into()])
//!     .row(["Widget", "9.99"])
//!     .row(["Gadget", "19.99"]);
//!
//! let html = dataset_to_html(&dataset, &TableOptions::default()).unwrap();
//! assert!(html.contains("<th>Name</th>"));
//! assert!(html.contains("<td>19.99</td>"));
//! ```

pub mod convert;
pub mod dataset;
pub mod document;
pub mod error;
pub mod options;
pub mod renderer;
pub mod source;
pub mod table;

pub use convert::{
    convert_dataset, convert_dir, convert_file, BatchError, BatchResult, ConvertOptions,
    ConvertSummary,
};
pub use dataset::{Cell, Dataset};
pub use document::{document_html, DEFAULT_STYLE};
pub use error::TabpdfError;
pub use options::{Margins, Orientation, PaperSize, RaggedRows, RenderOptions, TableOptions};
pub use renderer::{create_agent, render_to_file, HttpRenderer, RenderSource, Renderer};
pub use source::{discover_data_files, load_dataset, parse_csv, parse_json, DataFormat, FilterConfig};
pub use table::{dataset_to_html, escape_html};

/// Result type for tabpdflib operations
pub type Result<T> = std::result::Result<T, TabpdfError>;
