use crate::delta::AttributeSet;

use super::types::BlockKind;

/// Block kind carried by an attribute set, if any.
///
/// Conflicting block attributes resolve as header, code, blockquote, list.
pub fn block_kind(attrs: &AttributeSet) -> Option<BlockKind> {
    if let Some(level) = attrs.header {
        return Some(BlockKind::Header { level });
    }
    if attrs.code_block {
        return Some(BlockKind::Code);
    }
    if attrs.blockquote {
        return Some(BlockKind::Blockquote);
    }
    attrs.list.map(|kind| BlockKind::ListItem { kind })
}

pub fn has_block_attribute(attrs: &AttributeSet) -> bool {
    block_kind(attrs).is_some()
}
