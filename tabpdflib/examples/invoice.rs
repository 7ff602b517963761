//! Build a small invoice dataset and emit the HTML document.
//!
//! With TABPDF_SERVICE set (e.g. http://localhost:3000), also renders the
//! PDF through the conversion service.

use std::env;
use std::time::Duration;

use tabpdflib::{
    convert_dataset, document_html, ConvertOptions, Dataset, HttpRenderer, TableOptions,
};

fn main() {
    let dataset = Dataset::new(vec![
        "Item".to_string(),
        "Quantity".to_string(),
        "Unit Price".to_string(),
    ])
    .row(["Widget", "3", "9.99"])
    .row(["Gadget", "1", "19.99"])
    .row(["Shipping & handling", "1", "4.50"]);

    let html = document_html(&dataset, "Invoice #1042", None, &TableOptions::default())
        .expect("Failed to build document");
    std::fs::write("invoice.html", &html).expect("Failed to write invoice.html");
    println!("wrote invoice.html ({} bytes)", html.len());

    if let Ok(service) = env::var("TABPDF_SERVICE") {
        let renderer = HttpRenderer::new(service, Duration::from_secs(30));
        let options = ConvertOptions::new().title("Invoice #1042");
        let summary = convert_dataset(&renderer, &dataset, "invoice.pdf".as_ref(), &options)
            .expect("Failed to render invoice.pdf");
        println!("wrote invoice.pdf ({} bytes)", summary.bytes);
    }
}
