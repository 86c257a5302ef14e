//! # Delta parsing
//!
//! Groups delta ops into line-level [`ContentBlock`]s and coalesces adjacent
//! code and blockquote lines into single blocks.
//!
//! ## Modules
//!
//! - **`blocks`**: block types, the line builder, block-type classification
//!   and the merge post-pass
//! - **`snapshot`**: a stable text outline of parsed blocks for tests

pub mod blocks;
pub mod snapshot;

use crate::delta::Delta;

pub use blocks::{BlockBuilder, BlockKind, ContentBlock, ImageRef, LinkRef, Segment};

/// Parses a delta into merged content blocks.
pub fn parse_delta(delta: &Delta) -> Vec<ContentBlock> {
    let mut builder = BlockBuilder::new();
    for op in &delta.ops {
        builder.push(op);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{AttributeSet, ListKind, Op};
    use pretty_assertions::assert_eq;

    fn block_attr(f: impl FnOnce(&mut AttributeSet)) -> AttributeSet {
        let mut attrs = AttributeSet::default();
        f(&mut attrs);
        attrs
    }

    #[test]
    fn single_paragraph() {
        let blocks = parse_delta(&Delta::new(vec![Op::text("Hello\n")]));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].text(), "Hello");
    }

    #[test]
    fn empty_delta_has_no_blocks() {
        assert!(parse_delta(&Delta::default()).is_empty());
    }

    #[test]
    fn block_type_comes_from_newline_op() {
        let blocks = parse_delta(&Delta::new(vec![
            Op::text("Title"),
            Op::text("\n").with_attributes(block_attr(|a| a.header = Some(1))),
            Op::text("Body\n"),
        ]));
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Header { level: 1 });
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn adjacent_quotes_merge() {
        let quote = block_attr(|a| a.blockquote = true);
        let blocks = parse_delta(&Delta::new(vec![
            Op::text("A"),
            Op::text("\n").with_attributes(quote.clone()),
            Op::text("B"),
            Op::text("\n").with_attributes(quote),
        ]));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Blockquote);
        assert_eq!(blocks[0].text(), "A\nB");
    }

    #[test]
    fn list_items_do_not_merge() {
        let bullet = block_attr(|a| a.list = Some(ListKind::Bullet));
        let blocks = parse_delta(&Delta::new(vec![
            Op::text("one"),
            Op::text("\n").with_attributes(bullet.clone()),
            Op::text("two"),
            Op::text("\n").with_attributes(bullet),
        ]));
        assert_eq!(blocks.len(), 2);
    }
}
