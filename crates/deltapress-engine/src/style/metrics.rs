//! Text measurement for the base-14 fonts.
//!
//! Widths are the standard AFM advance widths (units per 1000 em) for the
//! printable ASCII range. Oblique/italic faces reuse the upright tables;
//! Helvetica-Oblique is identical to Helvetica and Times-Italic is close
//! enough for line breaking.

use super::fonts::{FontFace, FontFamily};
use crate::page::PT_TO_MM;

/// Host text-measurement facility used by line wrapping and alignment.
pub trait TextMeasurer {
    /// Advance width of one character in millimetres.
    fn char_width(&self, ch: char, face: FontFace, size: f32) -> f32;

    /// Advance width of `text` in millimetres.
    fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch, face, size)).sum()
    }
}

/// Measures text with the built-in base-14 width tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base14Metrics;

impl TextMeasurer for Base14Metrics {
    fn char_width(&self, ch: char, face: FontFace, size: f32) -> f32 {
        f32::from(advance(face, ch)) / 1000.0 * size * PT_TO_MM
    }
}

fn advance(face: FontFace, ch: char) -> u16 {
    let bold = face.style.is_bold();
    let table = match face.family {
        FontFamily::Courier => return 600,
        FontFamily::Helvetica if bold => &HELVETICA_BOLD,
        FontFamily::Helvetica => &HELVETICA,
        FontFamily::Times if bold => &TIMES_BOLD,
        FontFamily::Times => &TIMES_ROMAN,
    };
    match ch {
        ' '..='~' => table[ch as usize - 32],
        '\t' | '\u{a0}' => table[0],
        '\n' | '\r' => 0,
        '•' => 350,
        '–' => table[b'n' as usize - 32],
        '—' => 1000,
        _ => table[b'n' as usize - 32],
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::fonts::FontStyle;

    const HELV: FontFace = FontFace::new(FontFamily::Helvetica, FontStyle::Normal);

    #[test]
    fn courier_is_monospaced() {
        let face = FontFace::new(FontFamily::Courier, FontStyle::Bold);
        let m = Base14Metrics;
        assert_eq!(m.text_width("iiii", face, 10.0), m.text_width("WWWW", face, 10.0));
    }

    #[test]
    fn width_scales_with_size() {
        let m = Base14Metrics;
        let small = m.text_width("Hello", HELV, 10.0);
        let large = m.text_width("Hello", HELV, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn helvetica_space_width_in_mm() {
        // 278/1000 em at 12pt, converted to millimetres.
        let w = Base14Metrics.char_width(' ', HELV, 12.0);
        assert!((w - 0.278 * 12.0 * PT_TO_MM).abs() < 1e-5);
    }

    #[test]
    fn bold_is_wider() {
        let m = Base14Metrics;
        let bold = FontFace::new(FontFamily::Helvetica, FontStyle::Bold);
        assert!(m.text_width("abc", bold, 12.0) > m.text_width("abc", HELV, 12.0));
    }

    #[test]
    fn newline_has_no_width() {
        assert_eq!(Base14Metrics.char_width('\n', HELV, 12.0), 0.0);
    }
}
