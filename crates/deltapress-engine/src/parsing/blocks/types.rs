use std::ops::Range;

use crate::delta::{Align, AttributeSet, ListKind};

/// The kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Plain text line (default when no block attribute is present).
    #[default]
    Paragraph,
    Header {
        /// `1..=6`
        level: u8,
    },
    ListItem {
        kind: ListKind,
    },
    Blockquote,
    /// A code-block line, or several merged lines.
    Code,
}

impl BlockKind {
    /// Whether two consecutive blocks of these kinds coalesce into one.
    pub fn merges_with(self, next: BlockKind) -> bool {
        matches!(
            (self, next),
            (BlockKind::Code, BlockKind::Code) | (BlockKind::Blockquote, BlockKind::Blockquote)
        )
    }
}

/// A run of text with uniform inline attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub attributes: AttributeSet,
    /// Char range within the block's concatenated text.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub source: String,
    /// Char offset within the block text where the image was embedded.
    pub position: usize,
}

/// A link run. The block text holds a `[LINK: url]` placeholder at
/// `start..start + length`; `text` is what the editor displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub text: String,
    pub url: String,
    pub start: usize,
    pub length: usize,
}

/// A parsed block: one logical line, or several merged code/quote lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentBlock {
    pub kind: BlockKind,
    /// Attributes of the op that decided the block type.
    pub attributes: AttributeSet,
    pub segments: Vec<Segment>,
    pub images: Vec<ImageRef>,
    pub links: Vec<LinkRef>,
}

impl ContentBlock {
    /// Concatenated text of all segments.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Length of [`ContentBlock::text`] in chars.
    pub fn text_len(&self) -> usize {
        self.segments.last().map_or(0, |s| s.range.end)
    }

    pub fn alignment(&self) -> Align {
        self.attributes.align.unwrap_or_default()
    }

    pub fn indent(&self) -> u8 {
        self.attributes.indent
    }

    /// No visible text and no images.
    pub fn is_blank(&self) -> bool {
        self.images.is_empty() && self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    /// Appends a run. Link runs are replaced by a `[LINK: url]` placeholder
    /// and recorded in `links`.
    pub fn push_text(&mut self, text: &str, attributes: &AttributeSet) {
        if text.is_empty() {
            return;
        }
        let start = self.text_len();
        let text = match &attributes.link {
            Some(url) => {
                let placeholder = format!("[LINK: {url}]");
                self.links.push(LinkRef {
                    text: text.to_string(),
                    url: url.clone(),
                    start,
                    length: placeholder.chars().count(),
                });
                placeholder
            }
            None => text.to_string(),
        };
        let end = start + text.chars().count();
        self.segments.push(Segment {
            text,
            attributes: attributes.clone(),
            range: start..end,
        });
    }

    pub fn push_image(&mut self, source: &str) {
        self.images.push(ImageRef {
            source: source.to_string(),
            position: self.text_len(),
        });
    }

    /// Appends `next` after a `"\n"` separator, shifting its offsets.
    pub fn absorb(&mut self, next: ContentBlock) {
        self.push_text("\n", &AttributeSet::default());
        let offset = self.text_len();
        self.segments.extend(next.segments.into_iter().map(|mut s| {
            s.range = s.range.start + offset..s.range.end + offset;
            s
        }));
        self.images.extend(next.images.into_iter().map(|mut i| {
            i.position += offset;
            i
        }));
        self.links.extend(next.links.into_iter().map(|mut l| {
            l.start += offset;
            l
        }));
    }
}
