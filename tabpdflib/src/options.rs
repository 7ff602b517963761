//! Configuration types for table serialization and PDF rendering.
//!
//! These structs control how a dataset is turned into markup and how the
//! external renderer is asked to lay it out on paper. Everything is
//! builder-style and serializable; nothing here performs any work.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Policy for rows whose cell count disagrees with the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RaggedRows {
    /// Fail with a structured error naming the offending row
    #[default]
    Reject,
    /// Pad short rows with empty cells, truncate long rows
    Pad,
}

impl FromStr for RaggedRows {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(RaggedRows::Reject),
            "pad" => Ok(RaggedRows::Pad),
            _ => Err(format!("Unknown ragged-row policy: {}", s)),
        }
    }
}

/// Paper size for the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    /// 8.27 x 11.69 in
    #[default]
    A4,
    /// 11.69 x 16.54 in
    A3,
    /// 5.83 x 8.27 in
    A5,
    /// 8.5 x 11 in
    Letter,
    /// 8.5 x 14 in
    Legal,
    /// 11 x 17 in
    Tabloid,
}

impl PaperSize {
    /// Portrait (width, height) in inches.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::A3 => (11.69, 16.54),
            PaperSize::A5 => (5.83, 8.27),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Tabloid => (11.0, 17.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "a3" => Ok(PaperSize::A3),
            "a5" => Ok(PaperSize::A5),
            "letter" => Ok(PaperSize::Letter),
            "legal" => Ok(PaperSize::Legal),
            "tabloid" => Ok(PaperSize::Tabloid),
            _ => Err(format!("Unknown paper size: {}", s)),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Taller than wide (default)
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

impl Margins {
    /// Same margin on all four sides.
    pub fn uniform(inches: f64) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }

    /// No margins at all.
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }
}

/// The flat set of named options handed to the renderer.
///
/// Mirrors what the external engine accepts: page geometry, optional
/// header/footer fragments, a JavaScript-execution flag, and timing knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Paper size
    pub paper: PaperSize,
    /// Page orientation
    pub orientation: Orientation,
    /// Page margins in inches
    pub margins: Margins,
    /// HTML fragment repeated at the top of every page
    pub header_html: Option<String>,
    /// HTML fragment repeated at the bottom of every page
    pub footer_html: Option<String>,
    /// Whether the renderer may execute JavaScript in the document
    pub javascript: bool,
    /// Extra delay before capture, for pages that render asynchronously
    pub wait: Option<Duration>,
    /// Overall request timeout
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            header_html: None,
            footer_html: None,
            javascript: true,
            wait: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RenderOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set paper size.
    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Builder: set orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder: landscape orientation.
    pub fn landscape(mut self) -> Self {
        self.orientation = Orientation::Landscape;
        self
    }

    /// Builder: set margins.
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Builder: set the per-page header fragment.
    pub fn header_html(mut self, html: impl Into<String>) -> Self {
        self.header_html = Some(html.into());
        self
    }

    /// Builder: set the per-page footer fragment.
    pub fn footer_html(mut self, html: impl Into<String>) -> Self {
        self.footer_html = Some(html.into());
        self
    }

    /// Builder: allow or forbid JavaScript execution.
    pub fn javascript(mut self, enabled: bool) -> Self {
        self.javascript = enabled;
        self
    }

    /// Builder: wait before capture.
    pub fn wait(mut self, delay: Duration) -> Self {
        self.wait = Some(delay);
        self
    }

    /// Builder: set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Options for the tabular-to-markup serializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Policy for rows whose length disagrees with the column count
    pub ragged: RaggedRows,
    /// Optional `class` attribute for the `<table>` element
    pub table_class: Option<String>,
}

impl TableOptions {
    /// Create default options (reject ragged rows, no class attribute).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the ragged-row policy.
    pub fn ragged(mut self, policy: RaggedRows) -> Self {
        self.ragged = policy;
        self
    }

    /// Builder: set the table's `class` attribute.
    pub fn table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = Some(class.into());
        self
    }
}
