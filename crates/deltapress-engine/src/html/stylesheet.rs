use std::fmt::Write;

use crate::{page::PageSetup, style::header_scale};

const INDENT_LEVELS: u8 = 8;
const INDENT_STEP_PT: u32 = 20;

/// The print stylesheet: page size and margins, header scale, size,
/// alignment and indent classes, and block styles.
pub fn print_stylesheet(setup: &PageSetup) -> String {
    let (width, height) = setup.page_points();
    let size = setup.font_size;
    let mut css = String::new();

    let _ = writeln!(css, "@page {{ margin: 20mm; size: {width}pt {height}pt; }}");
    let _ = writeln!(
        css,
        "body {{ font-family: {}; font-size: {size}pt; line-height: {}pt; color: #000; \
         margin: 0; padding: 0; background: white; print-color-adjust: exact !important; }}",
        setup.font_family.css_stack(),
        round2(size * 1.1)
    );

    for level in 1..=6u8 {
        let header = size * header_scale(level);
        let gap = 2 * (7 - u32::from(level));
        let _ = writeln!(
            css,
            "h{level} {{ font-size: {}pt; margin: {}pt 0 {}pt 0; font-weight: bold; line-height: {}pt; }}",
            round2(header),
            8 + gap,
            6 + gap,
            round2(header * 1.1)
        );
    }

    css.push_str(
        "strong, b { font-weight: bold; }\n\
         em, i { font-style: italic; }\n\
         u { text-decoration: underline; }\n\
         s { text-decoration: line-through; }\n\
         sup { vertical-align: super; font-size: 0.75em; }\n\
         sub { vertical-align: sub; font-size: 0.75em; }\n\
         .ql-size-small { font-size: 10pt; }\n\
         .ql-size-large { font-size: 18pt; }\n\
         .ql-size-huge { font-size: 32pt; }\n\
         .ql-align-center { text-align: center; }\n\
         .ql-align-right { text-align: right; }\n\
         .ql-align-justify { text-align: justify; }\n",
    );
    for level in 1..=INDENT_LEVELS {
        let _ = writeln!(
            css,
            ".ql-indent-{level} {{ padding-left: {}pt; }}",
            u32::from(level) * INDENT_STEP_PT
        );
    }
    css.push_str(
        "ul, ol { margin: 8pt 0; padding-left: 20pt; }\n\
         li { margin: 4pt 0; }\n\
         p { margin: 6pt 0; }\n\
         a { color: #0066cc; text-decoration: underline; }\n\
         img { max-width: 100%; height: auto; margin: 8pt 0; }\n\
         blockquote { margin: 12pt 20pt; padding: 8pt 16pt; border-left: 4pt solid #ddd; \
         background: #f9f9f9; font-style: italic; }\n\
         pre { background: #f5f5f5; border: 1pt solid #ddd; border-radius: 4pt; padding: 12pt; \
         font-family: 'Courier New', Courier, monospace; font-size: 10pt; margin: 8pt 0; \
         white-space: pre-wrap; }\n",
    );
    css
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
