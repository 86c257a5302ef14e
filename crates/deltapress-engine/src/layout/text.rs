//! The line-wrapping text renderer.

use super::{
    Canvas, MARGIN,
    wrap::{VisualLine, wrap_segments},
};
use crate::{
    delta::{Align, sanitize_url},
    page::PT_TO_MM,
    render::{Rect, TextRun},
    style::FormattedSegment,
};

const UNDERLINE_OFFSET: f32 = 1.0;
const UNDERLINE_WIDTH: f32 = 0.2;
const STRIKE_RATIO: f32 = 0.1;
const STRIKE_WIDTH: f32 = 0.3;
const BACKGROUND_STRETCH: f32 = 1.2;

/// Where and how a block's lines are set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    /// Left edge for left-aligned and justified lines.
    pub x: f32,
    pub max_width: f32,
    pub align: Align,
    pub line_height: f32,
}

/// Wraps and draws `segments`, first baseline at `start_y`. Returns the y
/// below the last line. No segments at all still consume one line.
pub fn render_formatted_text(
    canvas: &mut Canvas<'_>,
    segments: &[FormattedSegment],
    frame: &TextFrame,
    start_y: f32,
) -> f32 {
    if segments.is_empty() {
        return start_y + frame.line_height;
    }
    let lines = wrap_segments(segments, frame.max_width, canvas.measurer);
    draw_lines(canvas, &lines, frame, start_y)
}

/// Draws lines one line height apart, moving to a new page when a line
/// would start below the bottom margin.
pub(crate) fn draw_lines(
    canvas: &mut Canvas<'_>,
    lines: &[VisualLine],
    frame: &TextFrame,
    start_y: f32,
) -> f32 {
    let mut y = start_y;
    for line in lines {
        if y > canvas.bottom() {
            y = canvas.new_page();
        }
        draw_line(canvas, line, frame, y);
        y += frame.line_height;
    }
    y
}

fn aligned_x(canvas: &Canvas<'_>, frame: &TextFrame, width: f32) -> f32 {
    match frame.align {
        Align::Left | Align::Justify => frame.x,
        Align::Center => canvas.page_width / 2.0 - width / 2.0,
        Align::Right => canvas.page_width - MARGIN - width,
    }
}

/// Draws one visual line with its baseline at `y`.
pub(crate) fn draw_line(canvas: &mut Canvas<'_>, line: &VisualLine, frame: &TextFrame, y: f32) {
    let word_spacing = if frame.align == Align::Justify
        && !line.ends_paragraph
        && line.space_count > 0
    {
        ((frame.max_width - line.width) / line.space_count as f32).max(0.0)
    } else {
        0.0
    };

    let mut x = aligned_x(canvas, frame, line.width);
    for piece in &line.pieces {
        let style = &piece.style;
        let (size, offset) = style.script_metrics();
        let spaces = piece.text.chars().filter(|c| *c == ' ').count() as f32;
        let width = piece.width + word_spacing * spaces;
        let text_height = style.size * PT_TO_MM;

        if let Some(background) = style.background {
            canvas.surface.fill_rect(
                Rect::new(x, y - text_height, width, text_height * BACKGROUND_STRETCH),
                background,
            );
        }

        canvas.surface.text(&TextRun {
            x,
            y: y + offset,
            face: style.face,
            size,
            color: style.color,
            word_spacing,
            text: piece.text.clone(),
        });

        if style.underline {
            let uy = y + offset + UNDERLINE_OFFSET;
            canvas
                .surface
                .line((x, uy), (x + width, uy), style.color, UNDERLINE_WIDTH);
        }
        if style.strike {
            let sy = y + offset - size * STRIKE_RATIO;
            canvas
                .surface
                .line((x, sy), (x + width, sy), style.color, STRIKE_WIDTH);
        }
        if let Some(url) = &style.link {
            canvas.surface.link(
                Rect::new(x, y - text_height, width, text_height * BACKGROUND_STRETCH),
                sanitize_url(url),
            );
        }

        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::{DisplayList, DrawOp},
        style::{Base14Metrics, FontFace, Rgb, TextStyle, TextMeasurer},
    };
    use pretty_assertions::assert_eq;

    const PAGE_W: f32 = 210.0;
    const PAGE_H: f32 = 297.0;

    fn seg(text: &str, start: usize, f: impl FnOnce(&mut TextStyle)) -> FormattedSegment {
        let mut style = TextStyle::plain(FontFace::default(), 12.0);
        f(&mut style);
        FormattedSegment {
            text: text.into(),
            style,
            range: start..start + text.chars().count(),
        }
    }

    fn frame(align: Align, max_width: f32) -> TextFrame {
        TextFrame {
            x: MARGIN,
            max_width,
            align,
            line_height: 5.0,
        }
    }

    fn render(segments: &[FormattedSegment], frame: &TextFrame, y: f32) -> (f32, DisplayList) {
        let mut list = DisplayList::new();
        let end = {
            let mut canvas = Canvas::new(&mut list, &Base14Metrics, PAGE_W, PAGE_H);
            render_formatted_text(&mut canvas, segments, frame, y)
        };
        (end, list)
    }

    #[test]
    fn empty_block_takes_one_line() {
        let (y, list) = render(&[], &frame(Align::Left, 170.0), 40.0);
        assert_eq!(y, 45.0);
        assert_eq!(list.texts().count(), 0);
    }

    #[test]
    fn advances_one_line_height_per_line() {
        let words = "lorem ipsum dolor sit amet ".repeat(20);
        let (y, list) = render(&[seg(&words, 0, |_| {})], &frame(Align::Left, 170.0), 40.0);
        let lines = list.texts().count();
        assert!(lines > 1);
        assert_eq!(y, 40.0 + 5.0 * lines as f32);
    }

    #[test]
    fn center_and_right_alignment() {
        let text = "centered";
        let width = Base14Metrics.text_width(text, FontFace::default(), 12.0);

        let (_, list) = render(&[seg(text, 0, |_| {})], &frame(Align::Center, 170.0), 40.0);
        let run = list.texts().next().unwrap();
        assert!((run.x - (PAGE_W / 2.0 - width / 2.0)).abs() < 1e-3);

        let (_, list) = render(&[seg(text, 0, |_| {})], &frame(Align::Right, 170.0), 40.0);
        let run = list.texts().next().unwrap();
        assert!((run.x - (PAGE_W - MARGIN - width)).abs() < 1e-3);
    }

    #[test]
    fn justify_stretches_all_but_last_line() {
        let words = "aa bb cc dd ee ff gg hh ii jj kk ll mm nn oo pp ".repeat(4);
        let (_, list) = render(&[seg(&words, 0, |_| {})], &frame(Align::Justify, 60.0), 40.0);
        let runs: Vec<_> = list.texts().collect();
        assert!(runs.len() > 2);
        assert!(runs[0].word_spacing > 0.0);
        assert_eq!(runs[runs.len() - 1].word_spacing, 0.0);
    }

    #[test]
    fn underline_and_strike_positions() {
        let segments = [seg("x", 0, |s| {
            s.underline = true;
            s.strike = true;
        })];
        let (_, list) = render(&segments, &frame(Align::Left, 170.0), 40.0);
        let lines: Vec<(f32, f32)> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line {
                    from, line_width, ..
                } => Some((from.1, *line_width)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert!((lines[0].0 - 41.0).abs() < 1e-4);
        assert_eq!(lines[0].1, UNDERLINE_WIDTH);
        assert!((lines[1].0 - (40.0 - 1.2)).abs() < 1e-4);
        assert_eq!(lines[1].1, STRIKE_WIDTH);
    }

    #[test]
    fn background_box_sits_behind_text() {
        let bg = Rgb::new(255, 255, 0);
        let segments = [seg("hi", 0, |s| s.background = Some(bg))];
        let (_, list) = render(&segments, &frame(Align::Left, 170.0), 40.0);
        let Some(DrawOp::FillRect { rect, color }) = list.ops.get(1) else {
            panic!("expected background first, got {:?}", list.ops);
        };
        assert_eq!(*color, bg);
        let h = 12.0 * PT_TO_MM;
        assert!((rect.y - (40.0 - h)).abs() < 1e-4);
        assert!((rect.height - h * 1.2).abs() < 1e-4);
        assert!(matches!(list.ops.get(2), Some(DrawOp::Text(_))));
    }

    #[test]
    fn superscript_is_raised_and_smaller() {
        let segments = [seg("2", 0, |s| s.script = Some(crate::delta::Script::Super))];
        let (_, list) = render(&segments, &frame(Align::Left, 170.0), 40.0);
        let run = list.texts().next().unwrap();
        assert!((run.size - 8.4).abs() < 1e-4);
        assert!((run.y - (40.0 - 4.8)).abs() < 1e-4);
    }

    #[test]
    fn links_register_an_area() {
        let segments = [seg("[LINK: https://a.b]", 0, |s| {
            s.link = Some("https://a.b".into())
        })];
        let (_, list) = render(&segments, &frame(Align::Left, 170.0), 40.0);
        assert!(
            list.ops
                .iter()
                .any(|op| matches!(op, DrawOp::Link { url, .. } if url == "https://a.b"))
        );
    }

    #[test]
    fn unsafe_link_schemes_are_blanked() {
        let segments = [seg("[LINK: javascript:alert(1)]", 0, |s| {
            s.link = Some("javascript:alert(1)".into())
        })];
        let (_, list) = render(&segments, &frame(Align::Left, 170.0), 40.0);
        let urls: Vec<&str> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Link { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(urls, vec!["about:blank"]);
    }

    #[test]
    fn overflowing_lines_continue_on_a_new_page() {
        let words = "lorem ipsum dolor sit amet ".repeat(40);
        let (y, list) = render(&[seg(&words, 0, |_| {})], &frame(Align::Left, 170.0), 270.0);
        assert_eq!(list.page_count(), 2);
        assert!(y < 270.0);
    }
}
