//! # tabpdf
//!
//! A CLI for converting CSV/JSON tables into PDF reports through a
//! Chromium render service.
//!
//! ## Overview
//!
//! tabpdf is built on top of tabpdflib. It loads a tabular data file,
//! serializes it to an escaped HTML table wrapped in a standalone document,
//! and delegates PDF production to an external conversion service (any
//! Gotenberg-compatible endpoint). The `html` subcommand stops after
//! document assembly, which is handy for previewing and needs no service.
//!
//! ## Usage
//!
//! ```bash
//! # Render a CSV file to PDF via the service at localhost:3000
//! tabpdf render sales.csv -o sales.pdf
//!
//! # Landscape Letter with a title and uniform 1-inch margins
//! tabpdf render sales.csv -o sales.pdf --title "Q3 Sales" \
//!     --paper letter --landscape --margin 1.0
//!
//! # Emit the HTML document only
//! tabpdf html sales.csv -o sales.html
//!
//! # Render a URL
//! tabpdf url https://example.com -o example.pdf
//!
//! # Convert every data file under reports/ into out/
//! tabpdf batch reports/ -o out/ --exclude "**/drafts/**"
//! ```
//!
//! The service URL comes from `--service`, the `TABPDF_SERVICE` environment
//! variable, or defaults to `http://localhost:3000`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use log::debug;
use tabpdflib::{
    convert_dir, convert_file, discover_data_files, document_html, load_dataset, ConvertOptions,
    FilterConfig, HttpRenderer, Margins, PaperSize, RaggedRows, RenderOptions, RenderSource,
    TableOptions,
};

/// Service endpoint used when neither the flag nor the env var is set.
const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

/// Attach the table-shaping args shared by all data-file subcommands.
fn with_table_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("title")
            .long("title")
            .help("Document title (defaults to the input file name)"),
    )
    .arg(
        Arg::new("css")
            .long("css")
            .value_name("FILE")
            .help("Extra stylesheet appended after the built-in one"),
    )
    .arg(
        Arg::new("ragged")
            .long("ragged")
            .value_parser(["reject", "pad"])
            .default_value("reject")
            .help("Policy for rows whose cell count disagrees with the header"),
    )
}

/// Attach the page-geometry and service args shared by rendering subcommands.
fn with_render_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("service")
            .long("service")
            .value_name("URL")
            .help("Render service URL (or TABPDF_SERVICE env var)"),
    )
    .arg(
        Arg::new("paper")
            .long("paper")
            .default_value("a4")
            .help("Paper size: a4, a3, a5, letter, legal, tabloid"),
    )
    .arg(
        Arg::new("landscape")
            .long("landscape")
            .action(ArgAction::SetTrue)
            .help("Landscape orientation"),
    )
    .arg(
        Arg::new("margin")
            .long("margin")
            .value_name("INCHES")
            .help("Uniform page margin in inches"),
    )
    .arg(
        Arg::new("header-html")
            .long("header-html")
            .value_name("FILE")
            .help("HTML fragment repeated at the top of every page"),
    )
    .arg(
        Arg::new("footer-html")
            .long("footer-html")
            .value_name("FILE")
            .help("HTML fragment repeated at the bottom of every page"),
    )
    .arg(
        Arg::new("no-javascript")
            .long("no-javascript")
            .action(ArgAction::SetTrue)
            .help("Forbid JavaScript execution in the document"),
    )
    .arg(
        Arg::new("wait")
            .long("wait")
            .value_name("SECONDS")
            .help("Extra delay before capture, for async pages"),
    )
    .arg(
        Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .default_value("30")
            .help("Request timeout in seconds"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabpdf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert CSV/JSON tables into PDF reports through a Chromium render service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_render_args(with_table_args(
            Command::new("render")
                .about("Convert a data file to PDF")
                .arg(Arg::new("input").required(true).help("CSV or JSON file"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("Output PDF path"),
                ),
        )))
        .subcommand(with_render_args(
            Command::new("url")
                .about("Render a URL to PDF")
                .arg(Arg::new("url").required(true).help("URL to render"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("Output PDF path"),
                ),
        ))
        .subcommand(with_table_args(
            Command::new("html")
                .about("Emit the assembled HTML document without rendering")
                .arg(Arg::new("input").required(true).help("CSV or JSON file"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output HTML path (stdout when omitted)"),
                ),
        ))
        .subcommand(with_render_args(with_table_args(
            Command::new("batch")
                .about("Convert every data file under a directory")
                .arg(Arg::new("dir").required(true).help("Directory to scan"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("Output directory for PDFs"),
                )
                .arg(
                    Arg::new("include")
                        .short('i')
                        .long("include")
                        .action(ArgAction::Append)
                        .help("Include files matching glob pattern"),
                )
                .arg(
                    Arg::new("exclude")
                        .short('e')
                        .long("exclude")
                        .action(ArgAction::Append)
                        .help("Exclude files matching glob pattern"),
                ),
        )))
}

/// Required string argument, as a Path.
fn required_path(matches: &ArgMatches, name: &str) -> anyhow::Result<PathBuf> {
    matches
        .get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("missing required argument: {}", name))
}

/// Resolve the render service URL: flag, then env, then default.
fn service_url(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("service")
        .cloned()
        .or_else(|| std::env::var("TABPDF_SERVICE").ok())
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
}

/// Build table options from matches.
fn build_table_options(matches: &ArgMatches) -> anyhow::Result<TableOptions> {
    let ragged = matches
        .get_one::<String>("ragged")
        .map(|s| RaggedRows::from_str(s))
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    Ok(TableOptions::new().ragged(ragged))
}

/// Build renderer options from matches.
fn build_render_options(matches: &ArgMatches) -> anyhow::Result<RenderOptions> {
    let mut options = RenderOptions::new();

    if let Some(paper) = matches.get_one::<String>("paper") {
        options = options.paper(PaperSize::from_str(paper).map_err(anyhow::Error::msg)?);
    }
    if matches.get_flag("landscape") {
        options = options.landscape();
    }
    if let Some(margin) = matches.get_one::<String>("margin") {
        let inches: f64 = margin
            .parse()
            .with_context(|| format!("invalid margin: {}", margin))?;
        options = options.margins(Margins::uniform(inches));
    }
    if let Some(path) = matches.get_one::<String>("header-html") {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read header fragment '{}'", path))?;
        options = options.header_html(html);
    }
    if let Some(path) = matches.get_one::<String>("footer-html") {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read footer fragment '{}'", path))?;
        options = options.footer_html(html);
    }
    if matches.get_flag("no-javascript") {
        options = options.javascript(false);
    }
    if let Some(wait) = matches.get_one::<String>("wait") {
        let seconds: f64 = wait
            .parse()
            .with_context(|| format!("invalid wait delay: {}", wait))?;
        options = options.wait(Duration::from_secs_f64(seconds));
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        let seconds: u64 = timeout
            .parse()
            .with_context(|| format!("invalid timeout: {}", timeout))?;
        options = options.timeout(Duration::from_secs(seconds));
    }

    Ok(options)
}

/// Build full conversion options from matches.
fn build_convert_options(matches: &ArgMatches) -> anyhow::Result<ConvertOptions> {
    let mut options = ConvertOptions::new()
        .table(build_table_options(matches)?)
        .render(build_render_options(matches)?);

    if let Some(title) = matches.get_one::<String>("title") {
        options = options.title(title);
    }
    if let Some(path) = matches.get_one::<String>("css") {
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stylesheet '{}'", path))?;
        options = options.extra_css(css);
    }

    Ok(options)
}

fn print_summary(summary: &tabpdflib::ConvertSummary) {
    let path = Style::new().bold();
    println!(
        "{} ({} rows, {} columns, {} bytes)",
        path.apply_to(summary.output.display()),
        summary.rows,
        summary.columns,
        summary.bytes
    );
}

/// Handler for the render subcommand.
fn cmd_render(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = required_path(matches, "input")?;
    let output = required_path(matches, "output")?;
    let options = build_convert_options(matches)?;
    let service = service_url(matches);
    debug!("render service: {}", service);

    let renderer = HttpRenderer::new(service, options.render.timeout);
    let summary = convert_file(&renderer, &input, &output, &options)?;
    print_summary(&summary);
    Ok(())
}

/// Handler for the url subcommand.
fn cmd_url(matches: &ArgMatches) -> anyhow::Result<()> {
    let url = matches
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("missing required argument: url"))?;
    let output = required_path(matches, "output")?;
    let options = build_render_options(matches)?;
    let service = service_url(matches);
    debug!("render service: {}", service);

    let renderer = HttpRenderer::new(service, options.timeout);
    let bytes = tabpdflib::render_to_file(
        &renderer,
        &RenderSource::Url(url.clone()),
        &options,
        &output,
    )?;
    println!(
        "{} ({} bytes)",
        Style::new().bold().apply_to(output.display()),
        bytes
    );
    Ok(())
}

/// Handler for the html subcommand.
fn cmd_html(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = required_path(matches, "input")?;
    let table = build_table_options(matches)?;

    let dataset = load_dataset(&input)?;
    let title = matches
        .get_one::<String>("title")
        .cloned()
        .or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Report".to_string());
    let css = matches
        .get_one::<String>("css")
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read stylesheet '{}'", path))
        })
        .transpose()?;

    let html = document_html(&dataset, &title, css.as_deref(), &table)?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("failed to write '{}'", path))?;
            println!(
                "{} ({} bytes)",
                Style::new().bold().apply_to(path),
                html.len()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Handler for the batch subcommand.
fn cmd_batch(matches: &ArgMatches) -> anyhow::Result<()> {
    let dir = required_path(matches, "dir")?;
    let out_dir = required_path(matches, "output")?;
    let options = build_convert_options(matches)?;
    let service = service_url(matches);

    let mut filter = FilterConfig::new();
    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }
    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    // Surface an empty scan before any HTTP work
    let found = discover_data_files(&dir, &filter)?;
    if found.is_empty() {
        return Err(anyhow!("no data files found under {}", dir.display()));
    }

    let renderer = HttpRenderer::new(service, options.render.timeout);
    let result = convert_dir(&renderer, &dir, &out_dir, &filter, &options)?;

    for summary in &result.converted {
        print_summary(summary);
    }
    let failed = Style::new().red().bold();
    for error in &result.errors {
        eprintln!(
            "{} {}: {}",
            failed.apply_to("failed:"),
            error.input.display(),
            error.error
        );
    }

    if !result.errors.is_empty() {
        return Err(anyhow!(
            "{} of {} files failed",
            result.errors.len(),
            result.converted.len() + result.errors.len()
        ));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = build_command().get_matches();

    let result = match matches.subcommand() {
        Some(("render", sub)) => cmd_render(sub),
        Some(("url", sub)) => cmd_url(sub),
        Some(("html", sub)) => cmd_html(sub),
        Some(("batch", sub)) => cmd_batch(sub),
        _ => Err(anyhow!("unknown subcommand")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Style::new().red().bold().apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
