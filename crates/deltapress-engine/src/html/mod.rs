//! # HTML export
//!
//! Renders parsed blocks as a standalone, printable HTML document. Class
//! names follow the editor's own (`ql-size-*`, `ql-align-*`, `ql-indent-*`)
//! so the output also looks right when pasted back into it.

mod stylesheet;

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    delta::{
        Align, AttributeSet, FontChoice, ListKind, ListOrder, Script, SizeClass, sanitize_url,
    },
    page::PageSetup,
    parsing::{BlockKind, ContentBlock, LinkRef},
    style::{Rgb, parse_color},
};

pub use stylesheet::print_stylesheet;

/// Renders `blocks` into a complete HTML document.
pub fn render_document(blocks: &[ContentBlock], setup: &PageSetup) -> String {
    let mut body = String::new();
    let mut open_list: Option<ListOrder> = None;

    for block in blocks {
        let list_order = match block.kind {
            BlockKind::ListItem { kind } => Some(kind.order()),
            _ => None,
        };
        if open_list != list_order {
            if let Some(order) = open_list {
                body.push_str(close_list_tag(order));
            }
            if let Some(order) = list_order {
                body.push_str(open_list_tag(order));
            }
            open_list = list_order;
        }
        render_block(&mut body, block);
    }
    if let Some(order) = open_list {
        body.push_str(close_list_tag(order));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Document</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        print_stylesheet(setup),
        body
    )
}

fn open_list_tag(order: ListOrder) -> &'static str {
    match order {
        ListOrder::Ordered => "<ol>\n",
        ListOrder::Unordered => "<ul>\n",
    }
}

fn close_list_tag(order: ListOrder) -> &'static str {
    match order {
        ListOrder::Ordered => "</ol>\n",
        ListOrder::Unordered => "</ul>\n",
    }
}

fn block_classes(block: &ContentBlock) -> String {
    let mut classes = vec![];
    match block.alignment() {
        Align::Left => {}
        align => classes.push(format!("ql-align-{}", align.as_str())),
    }
    if block.indent() > 0 {
        classes.push(format!("ql-indent-{}", block.indent()));
    }
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    }
}

fn render_block(out: &mut String, block: &ContentBlock) {
    let classes = block_classes(block);
    let inline = render_inline(block);
    let _ = match block.kind {
        BlockKind::Header { level } => writeln!(out, "<h{level}{classes}>{inline}</h{level}>"),
        BlockKind::Paragraph if block.is_blank() => writeln!(out, "<p{classes}><br></p>"),
        BlockKind::Paragraph => writeln!(out, "<p{classes}>{inline}</p>"),
        BlockKind::ListItem { kind } => {
            let marker = match kind {
                ListKind::Checked => "[x] ",
                ListKind::Unchecked => "[ ] ",
                _ => "",
            };
            writeln!(out, "<li{classes}>{marker}{inline}</li>")
        }
        BlockKind::Blockquote => writeln!(out, "<blockquote>{inline}</blockquote>"),
        BlockKind::Code => writeln!(out, "<pre>{}</pre>", encode_text(&block.text())),
    };
    for image in &block.images {
        let _ = writeln!(
            out,
            "<img src=\"{}\" alt=\"\">",
            encode_double_quoted_attribute(&image.source)
        );
    }
}

fn render_inline(block: &ContentBlock) -> String {
    let mut out = String::new();
    for seg in &block.segments {
        if seg.text == "\n" {
            out.push_str("<br>");
            continue;
        }
        let link = block.links.iter().find(|l| l.start == seg.range.start);
        match (&seg.attributes.link, link) {
            (Some(_), Some(link)) => out.push_str(&render_link(link, &seg.attributes)),
            _ => out.push_str(&decorate(&encode_text(&seg.text), &seg.attributes)),
        }
    }
    out
}

fn render_link(link: &LinkRef, attrs: &AttributeSet) -> String {
    let inner = decorate(&encode_text(&link.text), attrs);
    format!(
        "<a href=\"{}\">{inner}</a>",
        encode_double_quoted_attribute(sanitize_url(&link.url))
    )
}

/// Wraps already-escaped text in the tags and styles for `attrs`.
fn decorate(text: &str, attrs: &AttributeSet) -> String {
    let mut html = text.to_string();
    match attrs.script {
        Some(Script::Super) => html = format!("<sup>{html}</sup>"),
        Some(Script::Sub) => html = format!("<sub>{html}</sub>"),
        None => {}
    }
    for (set, tag) in [
        (attrs.strike, "s"),
        (attrs.underline, "u"),
        (attrs.italic, "em"),
        (attrs.bold, "strong"),
    ] {
        if set {
            html = format!("<{tag}>{html}</{tag}>");
        }
    }

    let mut styles = vec![];
    let mut classes = vec![];
    if let (None, Some(color)) = (&attrs.link, attrs.color.as_deref()) {
        styles.push(format!("color: {}", parse_color(Some(color)).to_hex()));
    }
    if let Some(bg) = attrs.background.as_deref() {
        let bg = parse_color(Some(bg));
        if bg != Rgb::BLACK {
            styles.push(format!("background-color: {}", bg.to_hex()));
        }
    }
    match attrs.font {
        Some(FontChoice::Serif) => styles.push("font-family: serif".into()),
        Some(FontChoice::Monospace) => styles.push("font-family: monospace".into()),
        _ => {}
    }
    match attrs.size {
        Some(SizeClass::Small) => classes.push("ql-size-small"),
        Some(SizeClass::Large) => classes.push("ql-size-large"),
        Some(SizeClass::Huge) => classes.push("ql-size-huge"),
        Some(SizeClass::Points(points)) => styles.push(format!("font-size: {points}pt")),
        None => {}
    }

    if styles.is_empty() && classes.is_empty() {
        return html;
    }
    let mut open = String::from("<span");
    if !classes.is_empty() {
        let _ = write!(open, " class=\"{}\"", classes.join(" "));
    }
    if !styles.is_empty() {
        let _ = write!(open, " style=\"{}\"", styles.join("; "));
    }
    format!("{open}>{html}</span>")
}
