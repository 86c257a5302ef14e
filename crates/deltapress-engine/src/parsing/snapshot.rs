//! Stable text outline of parsed blocks, used with `insta` inline snapshots.
//!
//! One line per block (`Kind "text"`), followed by indented lines for each
//! segment that carries attributes, each image, and each link.

use std::fmt::Write;

use crate::delta::AttributeSet;

use super::{BlockKind, ContentBlock};

pub fn outline(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let _ = writeln!(out, "{} {:?}", kind_label(block.kind), block.text());
        for seg in &block.segments {
            let attrs = attribute_summary(&seg.attributes);
            if !attrs.is_empty() {
                let _ = writeln!(out, "  {}..{} {}", seg.range.start, seg.range.end, attrs);
            }
        }
        for image in &block.images {
            let _ = writeln!(out, "  image @{} {}", image.position, image.source);
        }
        for link in &block.links {
            let _ = writeln!(
                out,
                "  link {}+{} {:?} -> {}",
                link.start, link.length, link.text, link.url
            );
        }
    }
    out
}

fn kind_label(kind: BlockKind) -> String {
    match kind {
        BlockKind::Paragraph => "Paragraph".into(),
        BlockKind::Header { level } => format!("Header({level})"),
        BlockKind::ListItem { kind } => format!("List({kind:?})"),
        BlockKind::Blockquote => "Quote".into(),
        BlockKind::Code => "Code".into(),
    }
}

fn attribute_summary(a: &AttributeSet) -> String {
    let mut parts: Vec<String> = vec![];
    for (set, name) in [
        (a.bold, "bold"),
        (a.italic, "italic"),
        (a.underline, "underline"),
        (a.strike, "strike"),
    ] {
        if set {
            parts.push(name.into());
        }
    }
    if let Some(script) = a.script {
        parts.push(format!("script={script:?}"));
    }
    if let Some(size) = a.size {
        parts.push(format!("size={size:?}"));
    }
    if let Some(color) = &a.color {
        parts.push(format!("color={color}"));
    }
    if let Some(bg) = &a.background {
        parts.push(format!("background={bg}"));
    }
    parts.join(" ")
}
