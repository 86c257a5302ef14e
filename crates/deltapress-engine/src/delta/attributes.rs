//! Typed attribute set.
//!
//! Only recognized keys survive deserialization; values are coerced leniently
//! because editors serialize flags as `true`, `"true"`, `1` or `null`
//! depending on their history.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Super,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    Serif,
    Monospace,
    SansSerif,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeClass {
    Small,
    Large,
    Huge,
    /// An explicit size in points.
    Points(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Bullet,
    Checked,
    Unchecked,
}

/// Numbering family of a list kind; numbering restarts when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn order(self) -> ListOrder {
        match self {
            ListKind::Ordered => ListOrder::Ordered,
            _ => ListOrder::Unordered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

/// Formatting attributes of one op.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AttributeSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub script: Option<Script>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub link: Option<String>,
    pub font: Option<FontChoice>,
    pub size: Option<SizeClass>,
    /// Header level, `1..=6`.
    pub header: Option<u8>,
    pub blockquote: bool,
    pub code_block: bool,
    pub list: Option<ListKind>,
    pub align: Option<Align>,
    /// Indent level, `0..=8`.
    pub indent: u8,
}

impl From<Map<String, Value>> for AttributeSet {
    fn from(map: Map<String, Value>) -> Self {
        let mut attrs = AttributeSet::default();
        for (key, value) in &map {
            match key.as_str() {
                "bold" => attrs.bold = flag(value),
                "italic" => attrs.italic = flag(value),
                "underline" => attrs.underline = flag(value),
                "strike" | "strikethrough" => attrs.strike |= flag(value),
                "script" => {
                    attrs.script = match text(value).as_deref() {
                        Some("super") => Some(Script::Super),
                        Some("sub") => Some(Script::Sub),
                        _ => None,
                    }
                }
                "color" => attrs.color = text(value),
                "background" => attrs.background = text(value),
                "link" => attrs.link = text(value),
                "font" => attrs.font = text(value).map(|f| font_choice(&f)),
                "size" => attrs.size = text(value).and_then(|s| size_class(&s)),
                "header" => attrs.header = number(value).filter(|n| (1..=6).contains(n)),
                "blockquote" => attrs.blockquote = flag(value),
                "code-block" | "code_block" => attrs.code_block = flag(value),
                "list" => attrs.list = list_kind(value),
                "align" => {
                    attrs.align = match text(value).as_deref() {
                        Some("center") => Some(Align::Center),
                        Some("right") => Some(Align::Right),
                        Some("justify") => Some(Align::Justify),
                        Some("left") => Some(Align::Left),
                        _ => None,
                    }
                }
                "indent" => attrs.indent = number(value).unwrap_or(0).min(8),
                other => log::debug!("Ignoring unrecognized attribute '{other}'"),
            }
        }
        attrs
    }
}

impl AttributeSet {
    pub fn is_empty(&self) -> bool {
        *self == AttributeSet::default()
    }
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n.min(u64::from(u8::MAX)) as u8),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn font_choice(name: &str) -> FontChoice {
    match name.to_ascii_lowercase().as_str() {
        "serif" => FontChoice::Serif,
        "monospace" => FontChoice::Monospace,
        _ => FontChoice::SansSerif,
    }
}

fn list_kind(value: &Value) -> Option<ListKind> {
    match text(value).as_deref() {
        Some("ordered") => Some(ListKind::Ordered),
        Some("bullet") => Some(ListKind::Bullet),
        Some("checked") => Some(ListKind::Checked),
        Some("unchecked" | "check") => Some(ListKind::Unchecked),
        Some(other) => {
            log::debug!("Unknown list kind '{other}', treating as bullet");
            Some(ListKind::Bullet)
        }
        None if flag(value) => Some(ListKind::Bullet),
        None => None,
    }
}

/// Parses a size value: a class name or an explicit `pt`/`px`/`em` size.
/// `normal` and anything unparseable mean "no size class".
pub fn size_class(value: &str) -> Option<SizeClass> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "small" => return Some(SizeClass::Small),
        "large" => return Some(SizeClass::Large),
        "huge" => return Some(SizeClass::Huge),
        "normal" | "" => return None,
        _ => {}
    }
    let (number, factor, round) = if let Some(n) = value.strip_suffix("pt") {
        (n, 1.0, false)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 0.75, false)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, 12.0, true)
    } else {
        (value.as_str(), 1.0, false)
    };
    let points = number.trim().parse::<f32>().ok()? * factor;
    let points = if round { points.round() } else { points };
    (points.is_finite() && points > 0.0).then_some(SizeClass::Points(points))
}

const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Returns `url` trimmed when its scheme is http, https, mailto or tel,
/// otherwise `about:blank`.
pub fn sanitize_url(url: &str) -> &str {
    let url = url.trim();
    let safe = url.split_once(':').is_some_and(|(scheme, _)| {
        SAFE_SCHEMES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    });
    if safe { url } else { "about:blank" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn attrs(value: Value) -> AttributeSet {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("true"), true)]
    #[case(json!(1), true)]
    #[case(json!(false), false)]
    #[case(json!("false"), false)]
    #[case(json!(""), false)]
    #[case(json!(0), false)]
    #[case(json!(null), false)]
    fn bold_coercion(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(attrs(json!({ "bold": value })).bold, expected);
    }

    #[rstest]
    #[case("small", Some(SizeClass::Small))]
    #[case("Huge", Some(SizeClass::Huge))]
    #[case("normal", None)]
    #[case("14pt", Some(SizeClass::Points(14.0)))]
    #[case("16px", Some(SizeClass::Points(12.0)))]
    #[case("1.5em", Some(SizeClass::Points(18.0)))]
    #[case("1.3em", Some(SizeClass::Points(16.0)))]
    #[case("-3pt", None)]
    #[case("big", None)]
    fn size_values(#[case] input: &str, #[case] expected: Option<SizeClass>) {
        assert_eq!(size_class(input), expected);
    }

    #[test]
    fn legacy_strikethrough_key() {
        assert!(attrs(json!({ "strikethrough": true })).strike);
    }

    #[test]
    fn block_attributes() {
        let a = attrs(json!({
            "header": 2,
            "code-block": true,
            "list": "check",
            "align": "justify",
            "indent": 12
        }));
        assert_eq!(a.header, Some(2));
        assert!(a.code_block);
        assert_eq!(a.list, Some(ListKind::Unchecked));
        assert_eq!(a.align, Some(Align::Justify));
        assert_eq!(a.indent, 8);
    }

    #[test]
    fn out_of_range_header_is_dropped() {
        assert_eq!(attrs(json!({ "header": 9 })).header, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert!(attrs(json!({ "data-id": "x", "width": 30 })).is_empty());
    }

    #[test]
    fn list_order() {
        assert_eq!(ListKind::Checked.order(), ListOrder::Unordered);
        assert_eq!(ListKind::Ordered.order(), ListOrder::Ordered);
    }

    #[rstest]
    #[case("https://example.com/a", "https://example.com/a")]
    #[case("  HTTP://example.com ", "HTTP://example.com")]
    #[case("mailto:a@b.c", "mailto:a@b.c")]
    #[case("tel:+123", "tel:+123")]
    #[case("javascript:alert(1)", "about:blank")]
    #[case(" JavaScript:alert(1)", "about:blank")]
    #[case("data:text/html,<b>x</b>", "about:blank")]
    #[case("example.com/page", "about:blank")]
    fn url_schemes(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(sanitize_url(url), expected);
    }
}
