//! Blockquote and code boxes.
//!
//! A box is measured before drawing. Boxes that do not fit the rest of the
//! page move to the next one; boxes taller than a page are split into
//! per-page chunks, each drawn as a box of its own.

use std::ops::Range;

use super::{
    BOX_PADDING, BOX_VERTICAL_PADDING, Canvas, MARGIN, PARAGRAPH_SPACING, line_height,
    text::{TextFrame, draw_line},
    wrap::{VisualLine, wrap_segments},
};
use crate::{
    delta::Align,
    page::PageSetup,
    render::Rect,
    style::{FontFace, FontFamily, FontStyle, FormattedSegment, Rgb, TextStyle},
};

const QUOTE_BAR_WIDTH: f32 = 2.0;
const CODE_BORDER_WIDTH: f32 = 0.5;
/// First baseline sits this many line heights below the top padding.
const FIRST_BASELINE_RATIO: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
enum BoxKind {
    Quote,
    Code,
}

/// The parts of `segments` that fall inside `line`, re-based so the line
/// starts at offset 0. Segments outside the line are dropped.
pub fn slice_line(segments: &[FormattedSegment], line: Range<usize>) -> Vec<FormattedSegment> {
    segments
        .iter()
        .filter_map(|seg| {
            let start = seg.range.start.max(line.start);
            let end = seg.range.end.min(line.end);
            if start >= end {
                return None;
            }
            let text: String = seg
                .text
                .chars()
                .skip(start - seg.range.start)
                .take(end - start)
                .collect();
            Some(FormattedSegment {
                text,
                style: seg.style.clone(),
                range: start - line.start..end - line.start,
            })
        })
        .collect()
}

/// Char ranges of the `'\n'`-separated source lines of `text`.
fn source_lines(text: &str) -> Vec<Range<usize>> {
    let mut start = 0;
    text.split('\n')
        .map(|line| {
            let end = start + line.chars().count();
            let range = start..end;
            start = end + 1;
            range
        })
        .collect()
}

/// Draws a blockquote box at `y`; returns the y after it plus paragraph spacing.
pub fn render_blockquote(
    canvas: &mut Canvas<'_>,
    segments: &[FormattedSegment],
    text: &str,
    y: f32,
    setup: &PageSetup,
) -> f32 {
    let size = setup.font_size - 1.0;
    let frame = TextFrame {
        x: MARGIN + BOX_PADDING,
        max_width: canvas.content_width() - 2.0 * BOX_PADDING,
        align: Align::Left,
        line_height: line_height(size),
    };
    let mut lines = vec![];
    for range in source_lines(text) {
        let line_segments = slice_line(segments, range);
        if line_segments.is_empty() {
            lines.push(VisualLine::default());
        } else {
            lines.extend(wrap_segments(&line_segments, frame.max_width, canvas.measurer));
        }
    }
    draw_box(canvas, &lines, &frame, y, BoxKind::Quote)
}

/// Draws a code box at `y` in Courier, two points under the base size.
pub fn render_code_block(canvas: &mut Canvas<'_>, text: &str, y: f32, setup: &PageSetup) -> f32 {
    let style = TextStyle::plain(
        FontFace::new(FontFamily::Courier, FontStyle::Normal),
        setup.font_size - 2.0,
    );
    let frame = TextFrame {
        x: MARGIN + BOX_PADDING,
        max_width: canvas.content_width() - 2.0 * BOX_PADDING,
        align: Align::Left,
        line_height: line_height(style.size),
    };
    let mut lines = vec![];
    for source in text.split('\n') {
        if source.is_empty() {
            lines.push(VisualLine::default());
            continue;
        }
        let segment = FormattedSegment {
            text: source.to_string(),
            style: style.clone(),
            range: 0..source.chars().count(),
        };
        lines.extend(wrap_segments(&[segment], frame.max_width, canvas.measurer));
    }
    draw_box(canvas, &lines, &frame, y, BoxKind::Code)
}

fn draw_box(
    canvas: &mut Canvas<'_>,
    lines: &[VisualLine],
    frame: &TextFrame,
    start_y: f32,
    kind: BoxKind,
) -> f32 {
    let blank = [VisualLine::default()];
    let mut remaining = if lines.is_empty() { &blank[..] } else { lines };
    let lh = frame.line_height;
    let mut y = start_y;

    loop {
        let available = canvas.bottom() - y - 2.0 * BOX_VERTICAL_PADDING;
        let fit = (available / lh).floor().max(0.0) as usize;
        if remaining.len() > fit && y > MARGIN {
            y = canvas.new_page();
            continue;
        }

        let (chunk, rest) = remaining.split_at(remaining.len().min(fit.max(1)));
        let height = chunk.len() as f32 * lh + 2.0 * BOX_VERTICAL_PADDING;
        let rect = Rect::new(MARGIN, y, canvas.content_width(), height);
        match kind {
            BoxKind::Quote => {
                canvas.surface.fill_rect(rect, Rgb::LIGHT_GRAY);
                canvas.surface.line(
                    (MARGIN, y),
                    (MARGIN, y + height),
                    Rgb::GRAY_BORDER,
                    QUOTE_BAR_WIDTH,
                );
            }
            BoxKind::Code => {
                canvas
                    .surface
                    .stroke_rect(rect, Rgb::GRAY_BORDER, CODE_BORDER_WIDTH);
            }
        }

        let mut baseline = y + BOX_VERTICAL_PADDING + lh * FIRST_BASELINE_RATIO;
        for line in chunk {
            draw_line(canvas, line, frame, baseline);
            baseline += lh;
        }
        y += height;

        if rest.is_empty() {
            break;
        }
        remaining = rest;
        y = canvas.new_page();
    }

    y + PARAGRAPH_SPACING
}
