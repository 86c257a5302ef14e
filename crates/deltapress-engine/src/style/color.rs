use std::sync::OnceLock;

use regex::Regex;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const LINK_BLUE: Rgb = Rgb::new(0, 102, 204);
    pub const LIGHT_GRAY: Rgb = Rgb::new(249, 249, 249);
    pub const GRAY_BORDER: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#RRGGBB` or `rgb(r, g, b)`. Anything else, including a missing
/// value, resolves to black.
pub fn parse_color(value: Option<&str>) -> Rgb {
    value.and_then(try_parse_color).unwrap_or(Rgb::BLACK)
}

fn try_parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    parse_rgb_function(value)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb_function(value: &str) -> Option<Rgb> {
    static RGB_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = RGB_REGEX.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)$")
            .expect("Invalid rgb() regex")
    });
    let caps = re.captures(value)?;
    let channel = |i: usize| -> Option<u8> {
        let n: u16 = caps.get(i)?.as_str().parse().ok()?;
        Some(n.min(255) as u8)
    };
    Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
}
