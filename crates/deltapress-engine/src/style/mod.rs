//! # Styling
//!
//! Turns per-run delta attributes into concrete rendering attributes.
//!
//! ## Modules
//!
//! - **`color`**: `Rgb` and lenient color parsing (`#RRGGBB`, `rgb(r, g, b)`)
//! - **`fonts`**: PDF base-14 families, styles and faces
//! - **`metrics`**: `TextMeasurer` trait and base-14 advance widths
//! - **`resolve`**: the formatting resolver producing `FormattedSegment`s

pub mod color;
pub mod fonts;
pub mod metrics;
pub mod resolve;

pub use color::{Rgb, parse_color};
pub use fonts::{FontFace, FontFamily, FontStyle};
pub use metrics::{Base14Metrics, TextMeasurer};
pub use resolve::{FormattedSegment, TextStyle, format_block, header_scale, resolve_style};
