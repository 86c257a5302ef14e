//! The page flow controller.
//!
//! Walks parsed blocks top to bottom, dispatching each to the renderer for
//! its kind and tracking the vertical cursor, page breaks and list
//! numbering.

use super::{
    Canvas, IMAGE_SPACING, INDENT_STEP, LIST_INDENT, LIST_SPACING, LIST_WIDTH_REDUCTION, MARGIN,
    MIN_IMAGE_HEIGHT, PARAGRAPH_SPACING,
    boxed::{render_blockquote, render_code_block},
    images::{ImageError, ImageLoader, fit_image},
    line_height,
    text::{TextFrame, render_formatted_text},
};
use crate::{
    delta::{ListKind, ListOrder},
    page::PageSetup,
    parsing::{BlockKind, ContentBlock},
    render::{Rect, Surface},
    style::{
        FontFace, FontStyle, FormattedSegment, TextMeasurer, TextStyle, format_block,
        resolve::block_base_size,
    },
};

/// Mutable layout state for one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Distance from the page top in millimetres.
    pub y: f32,
    /// 1-based index of the current page.
    pub page: usize,
    pub list_number: u32,
    pub last_list: Option<ListOrder>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            y: MARGIN,
            page: 1,
            list_number: 1,
            last_list: None,
        }
    }
}

impl Cursor {
    /// Marker text for the next list item. Numbering restarts whenever the
    /// ordered/unordered family changes.
    pub fn list_marker(&mut self, kind: ListKind) -> String {
        let order = kind.order();
        if self.last_list != Some(order) {
            self.list_number = 1;
            self.last_list = Some(order);
        }
        match kind {
            ListKind::Ordered => {
                let n = self.list_number;
                self.list_number += 1;
                format!("{n}. ")
            }
            ListKind::Bullet => "• ".to_string(),
            ListKind::Checked => "[x] ".to_string(),
            ListKind::Unchecked => "[ ] ".to_string(),
        }
    }
}

/// Summary of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutReport {
    pub pages: usize,
    pub blocks: usize,
    pub images_placed: usize,
    pub images_skipped: usize,
}

/// Lays `blocks` out onto `surface`, starting a first page.
pub fn layout_document(
    blocks: &[ContentBlock],
    setup: &PageSetup,
    surface: &mut dyn Surface,
    measurer: &dyn TextMeasurer,
    loader: &dyn ImageLoader,
) -> LayoutReport {
    let mut canvas = Canvas::new(surface, measurer, setup.page_width(), setup.page_height());
    let mut cursor = Cursor::default();
    let mut report = LayoutReport {
        blocks: blocks.len(),
        ..LayoutReport::default()
    };

    for block in blocks {
        if cursor.y > canvas.break_limit() {
            cursor.y = canvas.new_page();
        }
        cursor.y = layout_block(&mut canvas, &mut cursor, block, setup);

        for image in &block.images {
            match place_image(&mut canvas, loader, &image.source, cursor.y) {
                Ok(y) => {
                    cursor.y = y;
                    report.images_placed += 1;
                }
                Err(e) => {
                    log::warn!("Skipping image {}: {e}", preview(&image.source));
                    report.images_skipped += 1;
                }
            }
        }
        cursor.page = canvas.page();
    }

    report.pages = canvas.page();
    report
}

fn layout_block(
    canvas: &mut Canvas<'_>,
    cursor: &mut Cursor,
    block: &ContentBlock,
    setup: &PageSetup,
) -> f32 {
    let segments = format_block(block, setup);
    let indent = f32::from(block.indent()) * INDENT_STEP;
    let base_size = block_base_size(block.kind, setup);
    let y = cursor.y;

    match block.kind {
        BlockKind::Header { .. } => {
            let frame = TextFrame {
                x: MARGIN + indent,
                max_width: canvas.content_width() - indent,
                align: block.alignment(),
                line_height: line_height(largest_size(&segments, base_size)),
            };
            let y = render_formatted_text(canvas, &segments, &frame, y + frame.line_height);
            y + PARAGRAPH_SPACING
        }
        BlockKind::Paragraph => {
            let y = if block.text().trim().is_empty() {
                y + line_height(setup.font_size)
            } else {
                let frame = TextFrame {
                    x: MARGIN + indent,
                    max_width: canvas.content_width() - indent,
                    align: block.alignment(),
                    line_height: line_height(largest_size(&segments, base_size)),
                };
                render_formatted_text(canvas, &segments, &frame, y)
            };
            y + PARAGRAPH_SPACING
        }
        BlockKind::ListItem { kind } => {
            let marker = cursor.list_marker(kind);
            let segments = with_marker(&marker, segments, setup);
            let frame = TextFrame {
                x: MARGIN + LIST_INDENT + indent,
                max_width: canvas.content_width() - LIST_WIDTH_REDUCTION - indent,
                align: block.alignment(),
                line_height: line_height(largest_size(&segments, base_size)),
            };
            render_formatted_text(canvas, &segments, &frame, y) + LIST_SPACING
        }
        BlockKind::Blockquote => render_blockquote(canvas, &segments, &block.text(), y, setup),
        BlockKind::Code => render_code_block(canvas, &block.text(), y, setup),
    }
}

fn largest_size(segments: &[FormattedSegment], base: f32) -> f32 {
    segments
        .iter()
        .filter(|s| !s.text.trim().is_empty())
        .map(|s| s.style.size)
        .fold(base, f32::max)
}

/// Prepends a plain marker segment, shifting the block's segments after it.
fn with_marker(
    marker: &str,
    segments: Vec<FormattedSegment>,
    setup: &PageSetup,
) -> Vec<FormattedSegment> {
    let len = marker.chars().count();
    let face = FontFace::new(setup.font_family, FontStyle::Normal);
    let mut out = Vec::with_capacity(segments.len() + 1);
    out.push(FormattedSegment {
        text: marker.to_string(),
        style: TextStyle::plain(face, setup.font_size),
        range: 0..len,
    });
    out.extend(segments.into_iter().map(|mut s| {
        s.range = s.range.start + len..s.range.end + len;
        s
    }));
    out
}

fn place_image(
    canvas: &mut Canvas<'_>,
    loader: &dyn ImageLoader,
    source: &str,
    y: f32,
) -> Result<f32, ImageError> {
    let image = loader.load(source)?;
    let mut y = y;
    if canvas.page_height - y - MARGIN < MIN_IMAGE_HEIGHT {
        y = canvas.new_page();
    }
    let (width, height) = fit_image(
        image.width,
        image.height,
        canvas.content_width(),
        canvas.page_height - y - MARGIN,
    );
    // Tolerance for an image scaled to exactly the remaining height.
    if y + height > canvas.page_height - MARGIN + 1e-3 {
        y = canvas.new_page();
    }
    canvas
        .surface
        .image(&image, Rect::new(MARGIN, y, width, height));
    Ok(y + height + IMAGE_SPACING)
}

/// Shortens data URLs for log output.
fn preview(source: &str) -> String {
    const MAX: usize = 60;
    if source.chars().count() <= MAX {
        source.to_string()
    } else {
        let head: String = source.chars().take(MAX).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        delta::{AttributeSet, Delta, Op},
        layout::{
            PIXELS_TO_MM,
            images::{DecodedImage, SourceLoader, tests::png_data_url},
        },
        parsing::parse_delta,
        render::{DisplayList, DrawOp},
        style::Base14Metrics,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn layout(ops: Vec<Op>) -> (LayoutReport, DisplayList) {
        layout_with(ops, &SourceLoader::new())
    }

    fn layout_with(ops: Vec<Op>, loader: &dyn ImageLoader) -> (LayoutReport, DisplayList) {
        let blocks = parse_delta(&Delta::new(ops));
        let mut list = DisplayList::new();
        let report = layout_document(
            &blocks,
            &PageSetup::default(),
            &mut list,
            &Base14Metrics,
            loader,
        );
        (report, list)
    }

    fn attrs(f: impl FnOnce(&mut AttributeSet)) -> AttributeSet {
        let mut a = AttributeSet::default();
        f(&mut a);
        a
    }

    fn list_line(text: &str, kind: ListKind) -> Vec<Op> {
        vec![
            Op::text(text),
            Op::text("\n").with_attributes(attrs(|a| a.list = Some(kind))),
        ]
    }

    #[rstest]
    #[case(vec![ListKind::Ordered, ListKind::Ordered, ListKind::Ordered], vec!["1. ", "2. ", "3. "])]
    #[case(vec![ListKind::Ordered, ListKind::Bullet, ListKind::Ordered], vec!["1. ", "• ", "1. "])]
    #[case(vec![ListKind::Bullet, ListKind::Checked, ListKind::Unchecked], vec!["• ", "[x] ", "[ ] "])]
    fn list_markers(#[case] kinds: Vec<ListKind>, #[case] expected: Vec<&str>) {
        let mut cursor = Cursor::default();
        let markers: Vec<String> = kinds.into_iter().map(|k| cursor.list_marker(k)).collect();
        assert_eq!(markers, expected);
    }

    #[test]
    fn numbering_survives_paragraphs_between_items() {
        let mut ops = list_line("a", ListKind::Ordered);
        ops.push(Op::text("between\n"));
        ops.extend(list_line("b", ListKind::Ordered));
        let (_, list) = layout(ops);
        let texts: Vec<&str> = list.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1. ", "a", "between", "2. ", "b"]);
    }

    #[test]
    fn list_items_are_indented() {
        let (_, list) = layout(list_line("item", ListKind::Bullet));
        let marker = list.texts().next().unwrap();
        assert_eq!(marker.x, MARGIN + LIST_INDENT);
        assert_eq!(marker.text, "• ");
    }

    #[test]
    fn header_baseline_is_one_line_down() {
        let ops = vec![
            Op::text("Title"),
            Op::text("\n").with_attributes(attrs(|a| a.header = Some(1))),
        ];
        let (_, list) = layout(ops);
        let run = list.texts().next().unwrap();
        let size = 12.0 * 1.7;
        assert!((run.size - size).abs() < 1e-4);
        assert!((run.y - (MARGIN + line_height(size))).abs() < 1e-4);
        assert!(run.face.style.is_bold());
    }

    #[test]
    fn blank_paragraph_advances_base_line_height() {
        let (_, list) = layout(vec![Op::text("\nafter\n")]);
        let run = list.texts().next().unwrap();
        assert!((run.y - (MARGIN + line_height(12.0) + PARAGRAPH_SPACING)).abs() < 1e-4);
    }

    #[test]
    fn indent_shifts_paragraphs() {
        let ops = vec![
            Op::text("indented"),
            Op::text("\n").with_attributes(attrs(|a| a.indent = 2)),
        ];
        let (_, list) = layout(ops);
        let run = list.texts().next().unwrap();
        assert!((run.x - (MARGIN + 2.0 * INDENT_STEP)).abs() < 1e-4);
    }

    #[test]
    fn long_documents_break_pages() {
        let ops: Vec<Op> = (0..80).map(|i| Op::text(format!("Paragraph {i}\n"))).collect();
        let (report, list) = layout(ops);
        assert!(report.pages > 1);
        assert_eq!(report.pages, list.page_count());
        for page in list.texts_by_page() {
            for run in page {
                assert!(run.y <= 297.0 - MARGIN);
            }
        }
    }

    #[test]
    fn images_are_placed_below_text() {
        let ops = vec![Op::text("pic:"), Op::image(png_data_url(100, 50)), Op::text("\n")];
        let (report, list) = layout(ops);
        assert_eq!(report.images_placed, 1);
        let rect = list
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(rect.x, MARGIN);
        assert!((rect.width - 100.0 * PIXELS_TO_MM).abs() < 1e-3);
        let text_y = list.texts().next().unwrap().y;
        assert!(rect.y > text_y);
    }

    #[test]
    fn failed_images_are_skipped() {
        let ops = vec![Op::image("https://example.com/x.png"), Op::text("after\n")];
        let (report, list) = layout(ops);
        assert_eq!(report.images_skipped, 1);
        assert_eq!(report.images_placed, 0);
        assert_eq!(list.texts().count(), 1);
    }

    struct FixedLoader;

    impl ImageLoader for FixedLoader {
        fn load(&self, _source: &str) -> Result<DecodedImage, ImageError> {
            Ok(DecodedImage {
                jpeg: vec![0xff, 0xd8],
                width: 600,
                height: 2000,
            })
        }
    }

    #[test]
    fn tall_images_fit_remaining_page() {
        let ops = vec![Op::text("x"), Op::image("tall"), Op::text("\n")];
        let (_, list) = layout_with(ops, &FixedLoader);
        let rect = list
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!(rect.bottom() <= 297.0 - MARGIN + 1e-3);
        assert_eq!(list.page_count(), 1);
    }

    #[test]
    fn preview_truncates_data_urls() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), 61);
        assert_eq!(preview("short"), "short");
    }
}
