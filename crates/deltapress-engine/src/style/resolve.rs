//! The formatting resolver: a pure function from (run attributes, block
//! kind, page setup) to a concrete [`TextStyle`].

use std::ops::Range;

use super::{
    color::{Rgb, parse_color},
    fonts::{FontFace, FontFamily, FontStyle},
};
use crate::{
    delta::{AttributeSet, FontChoice, Script, SizeClass},
    page::PageSetup,
    parsing::{BlockKind, ContentBlock},
};

const SCRIPT_SCALE: f32 = 0.7;
const SUPERSCRIPT_OFFSET: f32 = 0.4;
const SUBSCRIPT_OFFSET: f32 = 0.25;
const MIN_SMALL_SIZE: f32 = 8.0;

/// Concrete rendering attributes for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    /// Size in points.
    pub size: f32,
    pub color: Rgb,
    pub background: Option<Rgb>,
    pub underline: bool,
    pub strike: bool,
    pub script: Option<Script>,
    pub link: Option<String>,
}

impl TextStyle {
    pub fn plain(face: FontFace, size: f32) -> Self {
        Self {
            face,
            size,
            color: Rgb::BLACK,
            background: None,
            underline: false,
            strike: false,
            script: None,
            link: None,
        }
    }

    /// Drawn size and baseline offset (negative is up).
    pub fn script_metrics(&self) -> (f32, f32) {
        match self.script {
            Some(Script::Super) => (self.size * SCRIPT_SCALE, -SUPERSCRIPT_OFFSET * self.size),
            Some(Script::Sub) => (self.size * SCRIPT_SCALE, SUBSCRIPT_OFFSET * self.size),
            None => (self.size, 0.0),
        }
    }
}

/// A styled run ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSegment {
    pub text: String,
    pub style: TextStyle,
    /// Char range within the block text.
    pub range: Range<usize>,
}

/// Header size multiplier; unknown levels render at body size.
pub fn header_scale(level: u8) -> f32 {
    match level {
        1 => 1.7,
        2 => 1.5,
        3 => 1.3,
        4 => 1.0,
        5 => 0.9,
        6 => 0.85,
        _ => 1.0,
    }
}

/// Size in points before any size class is applied.
pub fn block_base_size(kind: BlockKind, setup: &PageSetup) -> f32 {
    let base = setup.font_size;
    match kind {
        BlockKind::Code => base - 2.0,
        BlockKind::Blockquote => base - 1.0,
        BlockKind::Header { level } => base * header_scale(level),
        BlockKind::Paragraph | BlockKind::ListItem { .. } => base,
    }
}

pub fn resolve_style(attrs: &AttributeSet, kind: BlockKind, setup: &PageSetup) -> TextStyle {
    let mut size = block_base_size(kind, setup);
    size = match attrs.size {
        Some(SizeClass::Small) => (size - 2.0).max(MIN_SMALL_SIZE),
        Some(SizeClass::Large) => size + 4.0,
        Some(SizeClass::Huge) => size + 8.0,
        Some(SizeClass::Points(points)) => points,
        None => size,
    };

    let family = match (kind, attrs.font) {
        (BlockKind::Code, _) | (_, Some(FontChoice::Monospace)) => FontFamily::Courier,
        (_, Some(FontChoice::Serif)) => FontFamily::Times,
        _ => setup.font_family,
    };
    let mut style = FontStyle::from_flags(attrs.bold, attrs.italic);
    if matches!(kind, BlockKind::Header { .. }) {
        style = style.emboldened();
    }

    let color = if attrs.link.is_some() {
        Rgb::LINK_BLUE
    } else {
        parse_color(attrs.color.as_deref())
    };

    let background = match kind {
        BlockKind::Code | BlockKind::Blockquote => None,
        _ => attrs
            .background
            .as_deref()
            .map(|bg| parse_color(Some(bg)))
            .filter(|bg| *bg != Rgb::BLACK),
    };

    TextStyle {
        face: FontFace::new(family, style),
        size,
        color,
        background,
        underline: attrs.underline,
        strike: attrs.strike,
        script: attrs.script,
        link: attrs.link.clone(),
    }
}

/// Resolves every segment of a block.
pub fn format_block(block: &ContentBlock, setup: &PageSetup) -> Vec<FormattedSegment> {
    block
        .segments
        .iter()
        .map(|seg| FormattedSegment {
            text: seg.text.clone(),
            style: resolve_style(&seg.attributes, block.kind, setup),
            range: seg.range.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::ListKind;
    use rstest::rstest;

    fn setup(size: f32) -> PageSetup {
        PageSetup {
            font_size: size,
            ..PageSetup::default()
        }
    }

    #[rstest]
    #[case(1, 12.0 * 1.7)]
    #[case(2, 18.0)]
    #[case(3, 12.0 * 1.3)]
    #[case(4, 12.0)]
    #[case(5, 12.0 * 0.9)]
    #[case(6, 12.0 * 0.85)]
    fn header_sizes_are_bold(#[case] level: u8, #[case] expected: f32) {
        let style = resolve_style(
            &AttributeSet::default(),
            BlockKind::Header { level },
            &setup(12.0),
        );
        assert!((style.size - expected).abs() < 1e-4);
        assert!(style.face.style.is_bold());
    }

    #[rstest]
    #[case(12.0, 10.0)]
    #[case(9.0, 8.0)]
    fn small_size_has_a_floor(#[case] base: f32, #[case] expected: f32) {
        let attrs = AttributeSet {
            size: Some(SizeClass::Small),
            ..AttributeSet::default()
        };
        let style = resolve_style(&attrs, BlockKind::Paragraph, &setup(base));
        assert_eq!(style.size, expected);
    }

    #[test]
    fn superscript_metrics() {
        let attrs = AttributeSet {
            script: Some(Script::Super),
            ..AttributeSet::default()
        };
        let style = resolve_style(&attrs, BlockKind::Paragraph, &setup(12.0));
        let (size, offset) = style.script_metrics();
        assert!((size - 8.4).abs() < 1e-4);
        assert!((offset + 4.8).abs() < 1e-4);
    }

    #[test]
    fn link_overrides_color() {
        let attrs = AttributeSet {
            color: Some("#ff0000".into()),
            link: Some("https://x".into()),
            ..AttributeSet::default()
        };
        let style = resolve_style(&attrs, BlockKind::Paragraph, &setup(12.0));
        assert_eq!(style.color, Rgb::LINK_BLUE);
    }

    #[rstest]
    #[case(BlockKind::Paragraph, "#ffff00", Some(Rgb::new(255, 255, 0)))]
    #[case(BlockKind::ListItem { kind: ListKind::Bullet }, "#ffff00", Some(Rgb::new(255, 255, 0)))]
    #[case(BlockKind::Code, "#ffff00", None)]
    #[case(BlockKind::Blockquote, "#ffff00", None)]
    #[case(BlockKind::Paragraph, "#000000", None)]
    #[case(BlockKind::Paragraph, "yellow", None)]
    fn backgrounds(#[case] kind: BlockKind, #[case] bg: &str, #[case] expected: Option<Rgb>) {
        let attrs = AttributeSet {
            background: Some(bg.into()),
            ..AttributeSet::default()
        };
        assert_eq!(resolve_style(&attrs, kind, &setup(12.0)).background, expected);
    }

    #[test]
    fn code_is_courier_two_points_smaller() {
        let style = resolve_style(&AttributeSet::default(), BlockKind::Code, &setup(12.0));
        assert_eq!(style.face.family, FontFamily::Courier);
        assert_eq!(style.size, 10.0);
    }

    #[test]
    fn font_choice_overrides_base_family() {
        let serif = AttributeSet {
            font: Some(FontChoice::Serif),
            ..AttributeSet::default()
        };
        let style = resolve_style(&serif, BlockKind::Paragraph, &setup(12.0));
        assert_eq!(style.face.family, FontFamily::Times);
    }
}
