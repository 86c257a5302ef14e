//! Greedy line breaking over styled segments.
//!
//! Lines are computed as char ranges over the concatenated segment text,
//! trailing whitespace included, so mapping lines back onto segments never
//! drifts.

use std::ops::Range;

use crate::style::{FormattedSegment, TextMeasurer, TextStyle};

/// Breaks `chars` into lines no wider than `max_width`.
///
/// Whitespace hangs past the edge, words wider than a line break between
/// characters, and `'\n'` forces a break (and stays in its line's range).
/// Empty input yields one empty line.
pub fn break_lines(chars: &[char], widths: &[f32], max_width: f32) -> Vec<Range<usize>> {
    let n = chars.len();
    let mut lines = vec![];
    let mut start = 0;
    let mut width = 0.0;
    let mut last_break: Option<usize> = None;
    let mut i = 0;

    while i < n {
        let ch = chars[i];
        if ch == '\n' {
            lines.push(start..i + 1);
            start = i + 1;
            width = 0.0;
            last_break = None;
            i += 1;
            continue;
        }
        if is_break_space(ch) {
            width += widths[i];
            i += 1;
            last_break = Some(i);
            continue;
        }
        if width + widths[i] > max_width && i > start {
            match last_break {
                Some(b) if b > start => {
                    lines.push(start..b);
                    start = b;
                    width = widths[b..i].iter().sum();
                }
                _ => {
                    lines.push(start..i);
                    start = i;
                    width = 0.0;
                }
            }
            last_break = None;
            continue;
        }
        width += widths[i];
        i += 1;
    }

    if start < n || lines.is_empty() {
        lines.push(start..n);
    }
    lines
}

/// No-break spaces hold their neighbours together.
fn is_break_space(ch: char) -> bool {
    ch.is_whitespace() && ch != '\u{a0}'
}

/// A styled slice of one visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub text: String,
    pub style: TextStyle,
    /// Advance width in millimetres.
    pub width: f32,
    /// Char range within the concatenated segment text.
    pub range: Range<usize>,
}

/// One wrapped output line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualLine {
    pub pieces: Vec<Piece>,
    /// Width without trailing whitespace.
    pub width: f32,
    pub space_count: usize,
    /// Last line of a paragraph; never stretched when justifying.
    pub ends_paragraph: bool,
}

impl VisualLine {
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Wraps styled segments into visual lines of at most `max_width`.
pub fn wrap_segments(
    segments: &[FormattedSegment],
    max_width: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<VisualLine> {
    let mut chars = vec![];
    let mut widths = vec![];
    let mut owner = vec![];
    for (idx, seg) in segments.iter().enumerate() {
        let (size, _) = seg.style.script_metrics();
        for ch in seg.text.chars() {
            chars.push(ch);
            widths.push(measurer.char_width(ch, seg.style.face, size));
            owner.push(idx);
        }
    }

    let ranges = break_lines(&chars, &widths, max_width);
    let last = ranges.len().saturating_sub(1);
    ranges
        .into_iter()
        .enumerate()
        .map(|(n, range)| {
            let forced = range.end > range.start && chars[range.end - 1] == '\n';
            let mut end = range.end;
            while end > range.start && chars[end - 1].is_whitespace() {
                end -= 1;
            }
            let mut line = build_line(segments, &chars, &widths, &owner, range.start..end);
            line.ends_paragraph = forced || n == last;
            line
        })
        .collect()
}

fn build_line(
    segments: &[FormattedSegment],
    chars: &[char],
    widths: &[f32],
    owner: &[usize],
    range: Range<usize>,
) -> VisualLine {
    let mut line = VisualLine::default();
    let mut i = range.start;
    while i < range.end {
        let idx = owner[i];
        let start = i;
        while i < range.end && owner[i] == idx {
            i += 1;
        }
        let text: String = chars[start..i].iter().collect();
        let width: f32 = widths[start..i].iter().sum();
        line.space_count += text.chars().filter(|c| *c == ' ').count();
        line.width += width;
        line.pieces.push(Piece {
            text,
            style: segments[idx].style.clone(),
            width,
            range: start..i,
        });
    }
    line
}
