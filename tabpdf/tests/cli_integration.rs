//! Integration tests for tabpdf CLI
//!
//! The `render`, `url`, and `batch` subcommands need a running conversion
//! service, so these tests drive the network-free paths: `html`, argument
//! validation, and error reporting.

use std::path::Path;
use std::process::Command;

fn run_tabpdf(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "tabpdf", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_tabpdf(&["--help"]);

    assert!(success);
    assert!(stdout.contains("tabpdf"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("html"));
    assert!(stdout.contains("url"));
    assert!(stdout.contains("batch"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_tabpdf(&["--version"]);

    assert!(success);
    assert!(stdout.contains("tabpdf"));
}

#[test]
fn test_render_help_lists_page_options() {
    let (stdout, _, success) = run_tabpdf(&["render", "--help"]);

    assert!(success);
    assert!(stdout.contains("--paper"));
    assert!(stdout.contains("--landscape"));
    assert!(stdout.contains("--margin"));
    assert!(stdout.contains("--service"));
    assert!(stdout.contains("--ragged"));
}

#[test]
fn test_html_from_csv() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(temp.path(), "sales.csv", "Name,Amount\nWidget,9.99\n");
    let output = temp.path().join("sales.html");

    let (_, _, success) = run_tabpdf(&["html", &input, "-o", &output.to_string_lossy()]);

    assert!(success);
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<th>Name</th>"));
    assert!(html.contains("<td>9.99</td>"));
    // Title defaults to the input file stem
    assert!(html.contains("<title>sales</title>"));
}

#[test]
fn test_html_to_stdout_from_json() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(
        temp.path(),
        "items.json",
        r#"[{"Name": "Widget", "Amount": 9.99}]"#,
    );

    let (stdout, _, success) = run_tabpdf(&["html", &input, "--title", "Items"]);

    assert!(success);
    assert!(stdout.contains("<!DOCTYPE html>"));
    assert!(stdout.contains("<title>Items</title>"));
    assert!(stdout.contains("<td>Widget</td>"));
}

#[test]
fn test_html_escapes_cell_markup() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(
        temp.path(),
        "evil.csv",
        "Payload\n<script>alert(1)</script>\n",
    );

    let (stdout, _, success) = run_tabpdf(&["html", &input]);

    assert!(success);
    assert!(!stdout.contains("<script>"));
    assert!(stdout.contains("&lt;script&gt;"));
}

#[test]
fn test_html_ragged_rejected_by_default() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(temp.path(), "ragged.csv", "A,B\nonly-one\n");

    let (_, stderr, success) = run_tabpdf(&["html", &input]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("expected 2"));
}

#[test]
fn test_html_ragged_pad() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(temp.path(), "ragged.csv", "A,B\nonly-one\n");

    let (stdout, _, success) = run_tabpdf(&["html", &input, "--ragged", "pad"]);

    assert!(success);
    assert!(stdout.contains("<td>only-one</td><td></td>"));
}

#[test]
fn test_html_invalid_path() {
    let (_, stderr, success) = run_tabpdf(&["html", "/nonexistent/data.csv"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_html_unsupported_format() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(temp.path(), "data.xml", "<data/>");

    let (_, stderr, success) = run_tabpdf(&["html", &input]);

    assert!(!success);
    assert!(stderr.contains("unsupported input format"));
}

#[test]
fn test_render_rejects_bad_paper_size() {
    let temp = tempfile::tempdir().unwrap();
    let input = write_fixture(temp.path(), "sales.csv", "Name\nWidget\n");

    let (_, stderr, success) = run_tabpdf(&[
        "render",
        &input,
        "-o",
        "out.pdf",
        "--paper",
        "b5",
    ]);

    assert!(!success);
    assert!(stderr.contains("Unknown paper size"));
}

#[test]
fn test_batch_empty_directory_fails() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("out");

    let (_, stderr, success) = run_tabpdf(&[
        "batch",
        &temp.path().to_string_lossy(),
        "-o",
        &out.to_string_lossy(),
    ]);

    assert!(!success);
    assert!(stderr.contains("no data files found"));
}
