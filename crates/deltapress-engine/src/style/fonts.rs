/// The PDF base-14 families the renderer can draw without embedding fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Maps a user-facing family name onto a base-14 family.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans-serif" | "sans" => Some(FontFamily::Helvetica),
            "times" | "times-roman" | "times new roman" | "serif" => Some(FontFamily::Times),
            "courier" | "courier new" | "monospace" => Some(FontFamily::Courier),
            _ => None,
        }
    }

    /// Like [`FontFamily::from_name`], falling back to Helvetica.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown font family '{name}', using helvetica");
            FontFamily::Helvetica
        })
    }

    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica, Arial, system-ui, sans-serif",
            FontFamily::Times => "'Times New Roman', Times, serif",
            FontFamily::Courier => "'Courier New', Courier, monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => FontStyle::BoldItalic,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (false, false) => FontStyle::Normal,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    #[must_use]
    pub fn emboldened(self) -> Self {
        Self::from_flags(true, self.is_italic())
    }
}

/// A concrete font: family plus style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FontFace {
    pub family: FontFamily,
    pub style: FontStyle,
}

impl FontFace {
    pub const fn new(family: FontFamily, style: FontStyle) -> Self {
        Self { family, style }
    }

    /// PostScript name of the base-14 font.
    pub fn base_font_name(self) -> &'static str {
        match (self.family, self.style) {
            (FontFamily::Helvetica, FontStyle::Normal) => "Helvetica",
            (FontFamily::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontStyle::Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontStyle::BoldItalic) => "Helvetica-BoldOblique",
            (FontFamily::Times, FontStyle::Normal) => "Times-Roman",
            (FontFamily::Times, FontStyle::Bold) => "Times-Bold",
            (FontFamily::Times, FontStyle::Italic) => "Times-Italic",
            (FontFamily::Times, FontStyle::BoldItalic) => "Times-BoldItalic",
            (FontFamily::Courier, FontStyle::Normal) => "Courier",
            (FontFamily::Courier, FontStyle::Bold) => "Courier-Bold",
            (FontFamily::Courier, FontStyle::Italic) => "Courier-Oblique",
            (FontFamily::Courier, FontStyle::BoldItalic) => "Courier-BoldOblique",
        }
    }
}
