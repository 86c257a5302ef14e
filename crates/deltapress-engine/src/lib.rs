pub mod delta;
pub mod error;
pub mod export;
pub mod html;
pub mod layout;
pub mod page;
pub mod parsing;
pub mod render;
pub mod style;

// Re-export key types for easier usage
pub use delta::{AttributeSet, Delta, Insert, Op};
pub use error::EngineError;
pub use export::{OutputKind, document_filename, generate_html, generate_pdf};
pub use layout::{
    flow::{LayoutReport, layout_document},
    images::{DecodedImage, ImageError, ImageLoader, SourceLoader},
};
pub use page::{Orientation, PageSetup, PageSize};
pub use parsing::{BlockKind, ContentBlock, parse_delta};
pub use render::{DisplayList, PdfSurface, Surface};
pub use style::{FontFamily, FormattedSegment, Rgb, format_block};
