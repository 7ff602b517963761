//! PDF rendering via an external conversion service.
//!
//! The renderer is an opaque dependency: it takes an HTML string, a file, or
//! a URL plus a flat set of named options, and answers with a PDF byte
//! stream. [`HttpRenderer`] delegates to a Gotenberg-style Chromium service
//! over multipart HTTP POST; the [`Renderer`] trait keeps that choice
//! swappable (tests use an in-process fake).
//!
//! Nothing here interprets the PDF beyond checking the `%PDF-` signature on
//! the response.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info};
use ureq::Agent;

use crate::error::TabpdfError;
use crate::options::{Orientation, RenderOptions};
use crate::Result;

/// Input handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderSource {
    /// A complete HTML document as a string
    Html(String),
    /// Path to an HTML file on disk
    File(PathBuf),
    /// A URL the renderer should navigate to
    Url(String),
}

/// A backend that turns markup into a PDF byte stream.
pub trait Renderer {
    /// Render the source to PDF bytes, or fail with a structured error.
    fn render(&self, source: &RenderSource, options: &RenderOptions) -> Result<Vec<u8>>;
}

/// Create an HTTP agent with the specified timeout.
///
/// Use this to create a reusable agent for connection pooling when making
/// multiple render calls.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Check the PDF magic bytes at the start of a response body.
fn is_pdf(data: &[u8]) -> bool {
    data.len() >= 5 && &data[0..5] == b"%PDF-"
}

/// Incrementally built multipart/form-data request body.
struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self {
            boundary: format!("----tabpdf-{:032x}", nanos),
            body: Vec::new(),
        }
    }

    fn add_text(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    fn add_file(&mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Close the form, returning the Content-Type header value and the body.
    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        (content_type, self.body)
    }
}

/// Add the flat page-geometry fields the conversion service expects.
fn add_page_options(form: &mut MultipartForm, options: &RenderOptions) {
    let (width, height) = options.paper.dimensions();
    form.add_text("paperWidth", &format!("{}", width));
    form.add_text("paperHeight", &format!("{}", height));
    form.add_text("marginTop", &format!("{}", options.margins.top));
    form.add_text("marginBottom", &format!("{}", options.margins.bottom));
    form.add_text("marginLeft", &format!("{}", options.margins.left));
    form.add_text("marginRight", &format!("{}", options.margins.right));
    form.add_text(
        "landscape",
        if options.orientation == Orientation::Landscape {
            "true"
        } else {
            "false"
        },
    );
    form.add_text("javascript", if options.javascript { "true" } else { "false" });
    if let Some(wait) = options.wait {
        form.add_text("waitDelay", &format!("{}s", wait.as_secs_f64()));
    }
}

/// Renderer delegating to a Chromium conversion service over HTTP.
///
/// HTML sources are posted as multipart forms to
/// `{base}/forms/chromium/convert/html`; URL sources go to
/// `.../convert/url`. Header and footer fragments ride along as
/// `header.html` / `footer.html` file parts.
pub struct HttpRenderer {
    base_url: String,
    agent: Agent,
}

impl HttpRenderer {
    /// Create a renderer for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            agent: create_agent(timeout),
        }
    }

    fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/forms/chromium/convert/{}",
            self.base_url.trim_end_matches('/'),
            route
        )
    }

    fn send(&self, url: &str, form: MultipartForm) -> Result<Vec<u8>> {
        let (content_type, body) = form.finish();
        debug!("POST {} ({} byte form)", url, body.len());

        let response = self
            .agent
            .post(url)
            .header("Content-Type", &content_type)
            .send(&body[..])
            .map_err(|e| TabpdfError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let message = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(TabpdfError::Http { status, message });
        }

        let data = body
            .read_to_vec()
            .map_err(|e| TabpdfError::Transport(e.to_string()))?;

        if !is_pdf(&data) {
            return Err(TabpdfError::InvalidPdf);
        }

        Ok(data)
    }

    fn render_html(&self, html: &str, options: &RenderOptions) -> Result<Vec<u8>> {
        let mut form = MultipartForm::new();
        form.add_file("files", "index.html", "text/html", html.as_bytes());
        if let Some(header) = &options.header_html {
            form.add_file("files", "header.html", "text/html", header.as_bytes());
        }
        if let Some(footer) = &options.footer_html {
            form.add_file("files", "footer.html", "text/html", footer.as_bytes());
        }
        add_page_options(&mut form, options);

        self.send(&self.endpoint("html"), form)
    }

    fn render_url(&self, url: &str, options: &RenderOptions) -> Result<Vec<u8>> {
        let mut form = MultipartForm::new();
        form.add_text("url", url);
        add_page_options(&mut form, options);

        self.send(&self.endpoint("url"), form)
    }
}

impl Renderer for HttpRenderer {
    fn render(&self, source: &RenderSource, options: &RenderOptions) -> Result<Vec<u8>> {
        match source {
            RenderSource::Html(html) => self.render_html(html, options),
            RenderSource::File(path) => {
                let html =
                    std::fs::read_to_string(path).map_err(|source| TabpdfError::FileRead {
                        path: path.clone(),
                        source,
                    })?;
                self.render_html(&html, options)
            }
            RenderSource::Url(url) => self.render_url(url, options),
        }
    }
}

/// Render a source and persist the PDF byte stream to disk.
///
/// Returns the number of bytes written.
pub fn render_to_file(
    renderer: &dyn Renderer,
    source: &RenderSource,
    options: &RenderOptions,
    output: &Path,
) -> Result<u64> {
    let data = renderer.render(source, options)?;
    std::fs::write(output, &data)?;
    info!("wrote {} bytes to {}", data.len(), output.display());
    Ok(data.len() as u64)
}
