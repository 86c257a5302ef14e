//! Page geometry shared by every layout call.
//!
//! Page sizes are given in PDF points; layout itself works in millimetres
//! with the origin at the top-left corner of the page.

use crate::{error::EngineError, style::FontFamily};

/// Millimetres per PDF point.
pub const PT_TO_MM: f32 = 0.352_778;

/// Default custom page dimensions (points) when a dimension is missing.
const CUSTOM_FALLBACK: (f32, f32) = (595.0, 842.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    Letter,
    Legal,
    Tabloid,
    /// Width and height in points.
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// All named sizes, in the order they are offered to users.
    pub const NAMED: [(&'static str, PageSize); 10] = [
        ("A0", PageSize::A0),
        ("A1", PageSize::A1),
        ("A2", PageSize::A2),
        ("A3", PageSize::A3),
        ("A4", PageSize::A4),
        ("A5", PageSize::A5),
        ("A6", PageSize::A6),
        ("Letter", PageSize::Letter),
        ("Legal", PageSize::Legal),
        ("Tabloid", PageSize::Tabloid),
    ];

    /// Looks up a named size (case-insensitive). `Custom` is not a name here;
    /// use [`PageSize::custom`].
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, size)| *size)
    }

    /// A custom size; missing or non-positive dimensions use 595×842 pt.
    pub fn custom(width: Option<f32>, height: Option<f32>) -> Self {
        let pick = |v: Option<f32>, fallback: f32| v.filter(|v| *v > 0.0).unwrap_or(fallback);
        PageSize::Custom {
            width: pick(width, CUSTOM_FALLBACK.0),
            height: pick(height, CUSTOM_FALLBACK.1),
        }
    }

    /// Width and height in points, as listed (portrait for named sizes).
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A0 => (2383.94, 3370.39),
            PageSize::A1 => (1683.78, 2383.94),
            PageSize::A2 => (1190.55, 1683.78),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::A6 => (297.64, 419.53),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }

    pub fn name(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(_, size)| *size == self)
            .map(|(n, _)| *n)
            .unwrap_or("Custom")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// `"landscape"` or `"l"` (any case) selects landscape; anything else is portrait.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "landscape" | "l" => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page and font defaults for one generation pass.
///
/// Built once from user options and never mutated while laying out.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
    pub font_family: FontFamily,
    /// Base font size in points.
    pub font_size: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            font_family: FontFamily::Helvetica,
            font_size: 12.0,
        }
    }
}

impl PageSetup {
    pub fn new(
        size: PageSize,
        orientation: Orientation,
        font_family: FontFamily,
        font_size: f32,
    ) -> Result<Self, EngineError> {
        let (w, h) = size.dimensions();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(EngineError::InvalidPageSetup(format!(
                "page dimensions must be positive, got {w}x{h}"
            )));
        }
        if !(font_size.is_finite() && font_size > 0.0) {
            return Err(EngineError::InvalidPageSetup(format!(
                "font size must be positive, got {font_size}"
            )));
        }
        Ok(Self {
            size,
            orientation,
            font_family,
            font_size,
        })
    }

    /// Oriented page size in points: landscape pages are wider than tall,
    /// portrait pages taller than wide.
    pub fn page_points(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions();
        match self.orientation {
            Orientation::Landscape if w < h => (h, w),
            Orientation::Portrait if w > h => (h, w),
            _ => (w, h),
        }
    }

    /// Oriented page width in millimetres.
    pub fn page_width(&self) -> f32 {
        self.page_points().0 * PT_TO_MM
    }

    /// Oriented page height in millimetres.
    pub fn page_height(&self) -> f32 {
        self.page_points().1 * PT_TO_MM
    }
}
