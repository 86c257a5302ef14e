use super::types::ContentBlock;

/// Coalesces runs of adjacent code blocks and adjacent blockquote blocks.
pub fn merge_adjacent(blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    let mut out: Vec<ContentBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match out.last_mut() {
            Some(prev) if prev.kind.merges_with(block.kind) => prev.absorb(block),
            _ => out.push(block),
        }
    }
    out
}
