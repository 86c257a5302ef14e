//! # Drawing surfaces
//!
//! Layout draws through the [`Surface`] trait in millimetres with the origin
//! at the top-left of the page. [`PdfSurface`] writes a PDF; [`DisplayList`]
//! records operations so layout can be inspected in tests.

pub mod pdf;

use crate::{
    layout::images::DecodedImage,
    style::{FontFace, Rgb},
};

pub use pdf::PdfSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A positioned run of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    /// Size in points.
    pub size: f32,
    pub color: Rgb,
    /// Extra width added to every space, in millimetres.
    pub word_spacing: f32,
    pub text: String,
}

pub trait Surface {
    /// Starts a new page; subsequent drawing goes to it.
    fn add_page(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);
    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, line_width: f32);
    fn text(&mut self, run: &TextRun);
    fn image(&mut self, image: &DecodedImage, rect: Rect);
    /// Marks `rect` as a clickable URI link.
    fn link(&mut self, rect: Rect, url: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Page {
        width: f32,
        height: f32,
    },
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
        line_width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        line_width: f32,
    },
    Text(TextRun),
    Image {
        rect: Rect,
        width_px: u32,
        height_px: u32,
    },
    Link {
        rect: Rect,
        url: String,
    },
}

/// Records draw operations in order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Page { .. }))
            .count()
    }

    /// Text runs grouped by page, page order preserved.
    pub fn texts_by_page(&self) -> Vec<Vec<&TextRun>> {
        let mut pages: Vec<Vec<&TextRun>> = vec![];
        for op in &self.ops {
            match op {
                DrawOp::Page { .. } => pages.push(vec![]),
                DrawOp::Text(run) => {
                    if let Some(page) = pages.last_mut() {
                        page.push(run);
                    }
                }
                _ => {}
            }
        }
        pages
    }
}

impl Surface for DisplayList {
    fn add_page(&mut self, width: f32, height: f32) {
        self.ops.push(DrawOp::Page { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, line_width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    fn text(&mut self, run: &TextRun) {
        self.ops.push(DrawOp::Text(run.clone()));
    }

    fn image(&mut self, image: &DecodedImage, rect: Rect) {
        self.ops.push(DrawOp::Image {
            rect,
            width_px: image.width,
            height_px: image.height,
        });
    }

    fn link(&mut self, rect: Rect, url: &str) {
        self.ops.push(DrawOp::Link {
            rect,
            url: url.to_string(),
        });
    }
}
