use crate::delta::{AttributeSet, Insert, Op};

use super::{
    classify::{block_kind, has_block_attribute},
    merge::merge_adjacent,
    types::{BlockKind, ContentBlock},
};

/// The line being accumulated.
#[derive(Default)]
struct PendingLine {
    block: ContentBlock,
    /// Attributes of the first op in this line that carried a block attribute.
    block_attrs: Option<AttributeSet>,
}

impl PendingLine {
    fn note_attributes(&mut self, attrs: &AttributeSet) {
        if self.block_attrs.is_none() && has_block_attribute(attrs) {
            self.block_attrs = Some(attrs.clone());
        }
    }

    fn has_content(&self) -> bool {
        !self.block.segments.is_empty() || !self.block.images.is_empty()
    }
}

/// Splits delta ops into line blocks. Feed ops with [`BlockBuilder::push`],
/// then call [`BlockBuilder::finish`].
pub struct BlockBuilder {
    line: PendingLine,
    out: Vec<ContentBlock>,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            line: PendingLine::default(),
            out: vec![],
        }
    }

    pub fn push(&mut self, op: &Op) {
        match &op.insert {
            Some(Insert::Text(text)) => self.push_text(text, &op.attributes),
            Some(Insert::Embed(embed)) => match &embed.image {
                Some(source) => {
                    self.line.note_attributes(&op.attributes);
                    self.line.block.push_image(source);
                }
                None => {
                    let kinds: Vec<&str> = embed.other.keys().map(String::as_str).collect();
                    log::debug!("Ignoring unsupported embed {kinds:?}");
                }
            },
            None => log::warn!("Skipping delta op without an insert"),
        }
    }

    fn push_text(&mut self, text: &str, attrs: &AttributeSet) {
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                self.line.note_attributes(attrs);
                self.line.block.push_text(part, attrs);
            }
            // Every part but the last was followed by a newline.
            if parts.peek().is_some() {
                self.flush_line(Some(attrs));
            }
        }
    }

    /// Emits the pending line. `terminator` holds the attributes of the op
    /// carrying the `"\n"`, or `None` for a trailing unterminated line.
    fn flush_line(&mut self, terminator: Option<&AttributeSet>) {
        let PendingLine {
            mut block,
            block_attrs,
        } = std::mem::take(&mut self.line);
        let attributes = block_attrs
            .or_else(|| terminator.cloned())
            .unwrap_or_default();
        block.kind = block_kind(&attributes).unwrap_or(BlockKind::Paragraph);
        block.attributes = attributes;
        self.out.push(block);
    }

    pub fn finish(mut self) -> Vec<ContentBlock> {
        if self.line.has_content() {
            self.flush_line(None);
        }
        merge_adjacent(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{Align, ListKind};
    use pretty_assertions::assert_eq;

    fn build(ops: &[Op]) -> Vec<ContentBlock> {
        let mut builder = BlockBuilder::new();
        for op in ops {
            builder.push(op);
        }
        builder.finish()
    }

    fn with(f: impl FnOnce(&mut AttributeSet)) -> AttributeSet {
        let mut attrs = AttributeSet::default();
        f(&mut attrs);
        attrs
    }

    #[test]
    fn multiline_op_splits_into_blocks() {
        let blocks = build(&[Op::text("one\ntwo\nthree")]);
        let texts: Vec<String> = blocks.iter().map(ContentBlock::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_lines_become_blank_paragraphs() {
        let blocks = build(&[Op::text("a\n\nb\n")]);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].is_blank());
        assert!(blocks[1].segments.is_empty());
    }

    #[test]
    fn trailing_newline_adds_no_empty_block() {
        assert_eq!(build(&[Op::text("a\n")]).len(), 1);
    }

    #[test]
    fn first_block_attribute_in_line_wins() {
        let blocks = build(&[
            Op::text("item").with_attributes(with(|a| a.list = Some(ListKind::Ordered))),
            Op::text("\n").with_attributes(with(|a| a.header = Some(2))),
        ]);
        assert_eq!(
            blocks[0].kind,
            BlockKind::ListItem {
                kind: ListKind::Ordered
            }
        );
    }

    #[test]
    fn line_alignment_comes_from_newline() {
        let blocks = build(&[
            Op::text("centered").with_attributes(with(|a| a.bold = true)),
            Op::text("\n").with_attributes(with(|a| a.align = Some(Align::Center))),
        ]);
        assert_eq!(blocks[0].alignment(), Align::Center);
        assert!(blocks[0].segments[0].attributes.bold);
    }

    #[test]
    fn image_position_is_char_offset() {
        let blocks = build(&[Op::text("héllo"), Op::image("pic.png"), Op::text("\n")]);
        assert_eq!(blocks[0].images[0].position, 5);
    }

    #[test]
    fn trailing_unterminated_line_is_kept() {
        let blocks = build(&[Op::text("a\nb")]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn ops_without_insert_are_skipped() {
        let blocks = build(&[Op::default(), Op::text("x\n")]);
        assert_eq!(blocks.len(), 1);
    }
}
