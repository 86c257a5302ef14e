pub mod builder;
pub mod classify;
pub mod merge;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{block_kind, has_block_attribute};
pub use merge::merge_adjacent;
pub use types::{BlockKind, ContentBlock, ImageRef, LinkRef, Segment};
