//! Top-level generation entry points and output naming.

use chrono::NaiveDate;

use crate::{
    delta::Delta,
    html::render_document,
    layout::{flow::layout_document, images::ImageLoader},
    page::PageSetup,
    parsing::parse_delta,
    render::PdfSurface,
    style::Base14Metrics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Pdf,
    Html,
}

impl OutputKind {
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Pdf => "pdf",
            OutputKind::Html => "html",
        }
    }
}

/// `document-YYYY-MM-DD.pdf` or `.html`.
pub fn document_filename(date: NaiveDate, kind: OutputKind) -> String {
    format!("document-{}.{}", date.format("%Y-%m-%d"), kind.extension())
}

/// Parses, lays out and writes `delta` as PDF bytes.
pub fn generate_pdf(delta: &Delta, setup: &PageSetup, loader: &dyn ImageLoader) -> Vec<u8> {
    let blocks = parse_delta(delta);
    let mut surface = PdfSurface::new();
    let report = layout_document(&blocks, setup, &mut surface, &Base14Metrics, loader);
    log::info!(
        "Laid out {} blocks on {} page(s) ({} images placed, {} skipped)",
        report.blocks,
        report.pages,
        report.images_placed,
        report.images_skipped
    );
    surface.finish()
}

/// Renders `delta` as a printable HTML document.
pub fn generate_html(delta: &Delta, setup: &PageSetup) -> String {
    let blocks = parse_delta(delta);
    log::info!("Rendering {} blocks as HTML", blocks.len());
    render_document(&blocks, setup)
}
