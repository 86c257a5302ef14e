//! # Layout
//!
//! Positions parsed, styled blocks on pages. All lengths are millimetres
//! measured from the top-left corner of the page; font sizes are points.
//!
//! ## Modules
//!
//! - **`wrap`**: greedy line breaking and per-line styled pieces
//! - **`text`**: the line-wrapping text renderer (alignment, decorations)
//! - **`boxed`**: blockquote and code boxes, split across pages as needed
//! - **`images`**: image loading, decoding and fitting
//! - **`flow`**: the page flow controller driving everything above

pub mod boxed;
pub mod flow;
pub mod images;
pub mod text;
pub mod wrap;

use crate::{page::PT_TO_MM, render::Surface, style::TextMeasurer};

/// Page margin on every side.
pub const MARGIN: f32 = 20.0;
/// A new block starts a new page once the cursor is this far above the bottom margin.
pub const BREAK_THRESHOLD: f32 = 20.0;
pub const PARAGRAPH_SPACING: f32 = 2.5;
pub const LIST_INDENT: f32 = 10.0;
pub const LIST_WIDTH_REDUCTION: f32 = 15.0;
pub const LIST_SPACING: f32 = 1.5;
pub const BOX_PADDING: f32 = 8.0;
pub const BOX_VERTICAL_PADDING: f32 = 5.0;
pub const IMAGE_SPACING: f32 = 5.0;
/// Below this much remaining height an image starts on a fresh page.
pub const MIN_IMAGE_HEIGHT: f32 = 10.0;
pub const PIXELS_TO_MM: f32 = 0.264_583;
/// Horizontal shift per indent level (20pt).
pub const INDENT_STEP: f32 = 20.0 * PT_TO_MM;

/// Baseline-to-baseline distance for a font size in points.
pub fn line_height(size: f32) -> f32 {
    size * 0.29 + 1.1
}

/// A surface plus page geometry and page bookkeeping.
pub struct Canvas<'a> {
    pub surface: &'a mut dyn Surface,
    pub measurer: &'a dyn TextMeasurer,
    pub page_width: f32,
    pub page_height: f32,
    page: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `surface` and opens the first page.
    pub fn new(
        surface: &'a mut dyn Surface,
        measurer: &'a dyn TextMeasurer,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        surface.add_page(page_width, page_height);
        Self {
            surface,
            measurer,
            page_width,
            page_height,
            page: 1,
        }
    }

    /// Opens a new page and returns the y of its top margin.
    pub fn new_page(&mut self) -> f32 {
        self.surface.add_page(self.page_width, self.page_height);
        self.page += 1;
        log::debug!("Started page {}", self.page);
        MARGIN
    }

    /// Number of pages opened so far.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * MARGIN
    }

    /// Lowest y a line may start at.
    pub fn bottom(&self) -> f32 {
        self.page_height - MARGIN
    }

    /// Cursor position past which a new block goes to the next page.
    pub fn break_limit(&self) -> f32 {
        self.bottom() - BREAK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::DisplayList, style::Base14Metrics};

    #[test]
    fn line_height_formula() {
        assert!((line_height(12.0) - 4.58).abs() < 1e-4);
        assert!((line_height(10.0) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn canvas_opens_first_page() {
        let mut surface = DisplayList::new();
        let mut canvas = Canvas::new(&mut surface, &Base14Metrics, 210.0, 297.0);
        assert_eq!(canvas.page(), 1);
        assert_eq!(canvas.new_page(), MARGIN);
        assert_eq!(canvas.page(), 2);
        assert_eq!(canvas.content_width(), 170.0);
        assert_eq!(canvas.break_limit(), 257.0);
        drop(canvas);
        assert_eq!(surface.page_count(), 2);
    }
}
