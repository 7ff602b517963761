//! Error types for tabpdflib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, serializing, or rendering tables
#[derive(Error, Debug)]
pub enum TabpdfError {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input file has no recognized data format
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Malformed CSV input
    #[error("invalid CSV in '{path}' at line {line}: {message}")]
    CsvParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Malformed JSON input
    #[error("invalid JSON in '{path}': {message}")]
    JsonParse { path: PathBuf, message: String },

    /// A row's cell count disagrees with the column count
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Render service answered with an error status
    #[error("render service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Render service could not be reached
    #[error("render transport error: {0}")]
    Transport(String),

    /// Render service response does not carry a PDF document
    #[error("render service response is not a PDF document")]
    InvalidPdf,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
