//! High-level one-shot conversion API.
//!
//! This module provides the main entry points for turning tabular data into
//! PDF files: load (if needed), serialize to markup, assemble the document,
//! delegate to a [`Renderer`], and persist the result. Each call is a pure
//! one-shot pipeline; nothing is shared between invocations.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::document::document_html;
use crate::error::TabpdfError;
use crate::options::{RenderOptions, TableOptions};
use crate::renderer::{render_to_file, RenderSource, Renderer};
use crate::source::{discover_data_files, load_dataset, FilterConfig};
use crate::Result;

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Document title (defaults to the input file stem, or "Report")
    pub title: Option<String>,
    /// Extra CSS appended after the default stylesheet
    pub extra_css: Option<String>,
    /// Table serialization options
    pub table: TableOptions,
    /// Renderer options
    pub render: RenderOptions,
}

impl ConvertOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: append extra CSS.
    pub fn extra_css(mut self, css: impl Into<String>) -> Self {
        self.extra_css = Some(css.into());
        self
    }

    /// Builder: set table options.
    pub fn table(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Builder: set renderer options.
    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

/// Summary of one completed conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    /// Input file, when the conversion started from disk
    pub input: Option<PathBuf>,
    /// Where the PDF was written
    pub output: PathBuf,
    /// Data rows serialized
    pub rows: usize,
    /// Columns serialized
    pub columns: usize,
    /// PDF bytes written
    pub bytes: u64,
}

/// A single failed input within a batch conversion.
#[derive(Debug)]
pub struct BatchError {
    /// The input file that failed
    pub input: PathBuf,
    /// What went wrong
    pub error: TabpdfError,
}

/// Result of a batch conversion with partial failures.
///
/// Successfully converted files and per-file errors are both returned; one
/// bad input does not abort the batch.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Summaries for inputs that converted
    pub converted: Vec<ConvertSummary>,
    /// Errors for inputs that failed
    pub errors: Vec<BatchError>,
}

/// Convert an in-memory dataset to a PDF file.
pub fn convert_dataset(
    renderer: &dyn Renderer,
    dataset: &Dataset,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    let title = options.title.as_deref().unwrap_or("Report");
    debug!(
        "converting dataset '{}' ({} columns, {} rows)",
        title,
        dataset.width(),
        dataset.row_count()
    );

    let html = document_html(dataset, title, options.extra_css.as_deref(), &options.table)?;
    let bytes = render_to_file(renderer, &RenderSource::Html(html), &options.render, output)?;

    Ok(ConvertSummary {
        input: None,
        output: output.to_path_buf(),
        rows: dataset.row_count(),
        columns: dataset.width(),
        bytes,
    })
}

/// Convert a CSV or JSON file to a PDF file.
///
/// The document title defaults to the input file stem when no title is set.
pub fn convert_file(
    renderer: &dyn Renderer,
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    let dataset = load_dataset(input)?;

    let mut options = options.clone();
    if options.title.is_none() {
        if let Some(stem) = input.file_stem().and_then(|s| s.to_str()) {
            options.title = Some(stem.to_string());
        }
    }

    let mut summary = convert_dataset(renderer, &dataset, output, &options)?;
    summary.input = Some(input.to_path_buf());
    info!(
        "converted {} -> {} ({} rows)",
        input.display(),
        output.display(),
        summary.rows
    );
    Ok(summary)
}

/// Convert every discovered data file under `dir` into `out_dir`.
///
/// Output files take the input file stem with a `.pdf` extension. Failures
/// are collected per file rather than aborting the whole batch.
pub fn convert_dir(
    renderer: &dyn Renderer,
    dir: &Path,
    out_dir: &Path,
    filter: &FilterConfig,
    options: &ConvertOptions,
) -> Result<BatchResult> {
    let files = discover_data_files(dir, filter)?;
    std::fs::create_dir_all(out_dir)?;

    let mut result = BatchResult::default();

    for input in files {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("report");
        let output = out_dir.join(format!("{}.pdf", stem));

        match convert_file(renderer, &input, &output, options) {
            Ok(summary) => result.converted.push(summary),
            Err(error) => {
                warn!("failed to convert {}: {}", input.display(), error);
                result.errors.push(BatchError { input, error });
            }
        }
    }

    info!(
        "batch complete: {} converted, {} failed",
        result.converted.len(),
        result.errors.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RaggedRows;
    use std::fs;
    use tempfile::tempdir;

    /// Renderer that returns fixed bytes without touching the network.
    struct MockRenderer;

    impl Renderer for MockRenderer {
        fn render(&self, source: &RenderSource, _options: &RenderOptions) -> Result<Vec<u8>> {
            match source {
                RenderSource::Html(html) => {
                    // Embed the html length so tests can detect distinct inputs
                    Ok(format!("%PDF-1.7 fake ({} chars)", html.len()).into_bytes())
                }
                _ => Ok(b"%PDF-1.7 fake".to_vec()),
            }
        }
    }

    /// Renderer that always fails, for exercising error paths.
    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _source: &RenderSource, _options: &RenderOptions) -> Result<Vec<u8>> {
            Err(TabpdfError::Transport("connection refused".to_string()))
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec!["Name".to_string(), "Amount".to_string()])
            .row(["Widget", "9.99"])
            .row(["Gadget", "19.99"])
    }

    #[test]
    fn test_convert_dataset_writes_pdf() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("report.pdf");

        let summary = convert_dataset(
            &MockRenderer,
            &sample_dataset(),
            &output,
            &ConvertOptions::new().title("Q3 Sales"),
        )
        .unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns, 2);
        assert!(summary.input.is_none());
        assert_eq!(summary.output, output);

        let written = fs::read(&output).unwrap();
        assert_eq!(written.len() as u64, summary.bytes);
        assert!(written.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_convert_file_title_defaults_to_stem() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("q3-sales.csv");
        let output = temp.path().join("q3-sales.pdf");
        fs::write(&input, "Name,Amount\nWidget,9.99\n").unwrap();

        let summary =
            convert_file(&MockRenderer, &input, &output, &ConvertOptions::new()).unwrap();

        assert_eq!(summary.input.as_deref(), Some(input.as_path()));
        assert_eq!(summary.rows, 1);
        assert!(output.exists());
    }

    #[test]
    fn test_convert_file_render_failure() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("data.csv");
        let output = temp.path().join("data.pdf");
        fs::write(&input, "Name\nWidget\n").unwrap();

        let err = convert_file(&FailingRenderer, &input, &output, &ConvertOptions::new())
            .unwrap_err();

        assert!(matches!(err, TabpdfError::Transport(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_dir_partial_failure() {
        let temp = tempdir().unwrap();
        let data = temp.path().join("data");
        let out = temp.path().join("out");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("good.csv"), "Name,Amount\nWidget,9.99\n").unwrap();
        fs::write(data.join("bad.csv"), "Name\n\"unclosed\n").unwrap();

        let result = convert_dir(
            &MockRenderer,
            &data,
            &out,
            &FilterConfig::new(),
            &ConvertOptions::new(),
        )
        .unwrap();

        assert_eq!(result.converted.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].input.ends_with("bad.csv"));
        assert!(matches!(result.errors[0].error, TabpdfError::CsvParse { .. }));
        assert!(out.join("good.pdf").exists());
        assert!(!out.join("bad.pdf").exists());
    }

    #[test]
    fn test_convert_dir_respects_ragged_policy() {
        let temp = tempdir().unwrap();
        let data = temp.path().join("data");
        let out = temp.path().join("out");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("ragged.csv"), "A,B\nonly-one\n").unwrap();

        // Default policy rejects the short row
        let rejected = convert_dir(
            &MockRenderer,
            &data,
            &out,
            &FilterConfig::new(),
            &ConvertOptions::new(),
        )
        .unwrap();
        assert_eq!(rejected.converted.len(), 0);
        assert_eq!(rejected.errors.len(), 1);

        // Padding converts it
        let padded = convert_dir(
            &MockRenderer,
            &data,
            &out,
            &FilterConfig::new(),
            &ConvertOptions::new().table(TableOptions::new().ragged(RaggedRows::Pad)),
        )
        .unwrap();
        assert_eq!(padded.converted.len(), 1);
        assert!(padded.errors.is_empty());
    }
}
