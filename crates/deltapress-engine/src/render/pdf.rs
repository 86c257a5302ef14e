//! PDF output via `pdf-writer`.
//!
//! Text uses the base-14 Type1 fonts with WinAnsi encoding, so nothing is
//! embedded. Content streams are Flate-compressed. Object ids are allocated
//! in a fixed order, so identical drawing produces identical bytes.

use std::collections::BTreeMap;

use pdf_writer::{
    Content, Filter, Name, Pdf, Rect as PdfRect, Ref, Str,
    types::{ActionType, AnnotationType},
};

use super::{Rect, Surface, TextRun};
use crate::{
    layout::images::DecodedImage,
    page::PT_TO_MM,
    style::{FontFace, Rgb},
};

fn pt(mm: f32) -> f32 {
    mm / PT_TO_MM
}

/// Page sizes survive the mm round trip only to about 1e-4 pt.
fn round_pt(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

struct PageData {
    width: f32,
    height: f32,
    content: Content,
    links: Vec<(PdfRect, String)>,
}

struct ImageData {
    name: String,
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

#[derive(Default)]
pub struct PdfSurface {
    pages: Vec<PageData>,
    /// Resource name per face, numbered in first-use order.
    fonts: BTreeMap<FontFace, String>,
    images: Vec<ImageData>,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self) -> &mut PageData {
        if self.pages.is_empty() {
            self.add_page(595.28 * PT_TO_MM, 841.89 * PT_TO_MM);
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn font_name(&mut self, face: FontFace) -> String {
        let next = self.fonts.len() + 1;
        self.fonts
            .entry(face)
            .or_insert_with(|| format!("F{next}"))
            .clone()
    }

    /// Converts a top-left mm rect into a bottom-left pt rect on the current page.
    fn to_pdf(&mut self, rect: Rect) -> (f32, f32, f32, f32) {
        let height = self.page().height;
        (
            pt(rect.x),
            height - pt(rect.bottom()),
            pt(rect.width),
            pt(rect.height),
        )
    }

    /// Writes the document and returns its bytes.
    pub fn finish(self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        let font_refs: Vec<(String, Ref)> = self
            .fonts
            .iter()
            .map(|(face, name)| {
                let font_ref = alloc();
                pdf.type1_font(font_ref)
                    .base_font(Name(face.base_font_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (name.clone(), font_ref)
            })
            .collect();

        let image_refs: Vec<(String, Ref)> = self
            .images
            .iter()
            .map(|img| {
                let xobj_ref = alloc();
                let mut xobj = pdf.image_xobject(xobj_ref, &img.jpeg);
                xobj.filter(Filter::DctDecode);
                xobj.width(img.width as i32);
                xobj.height(img.height as i32);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
                (img.name.clone(), xobj_ref)
            })
            .collect();

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let page_id = alloc();
            let content_id = alloc();
            page_ids.push(page_id);

            let annot_refs: Vec<Ref> = page
                .links
                .iter()
                .map(|(rect, url)| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(AnnotationType::Link)
                        .rect(*rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(url.as_bytes()));
                    annot_ref
                })
                .collect();

            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

            let mut pdf_page = pdf.page(page_id);
            pdf_page
                .media_box(PdfRect::new(0.0, 0.0, page.width, page.height))
                .parent(pages_id)
                .contents(content_id);
            if !annot_refs.is_empty() {
                pdf_page.annotations(annot_refs.iter().copied());
            }
            let mut resources = pdf_page.resources();
            {
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_refs {
                    fonts.pair(Name(name.as_bytes()), *font_ref);
                }
            }
            if !image_refs.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_refs {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        pdf.finish()
    }
}

impl Surface for PdfSurface {
    fn add_page(&mut self, width: f32, height: f32) {
        self.pages.push(PageData {
            width: round_pt(pt(width)),
            height: round_pt(pt(height)),
            content: Content::new(),
            links: vec![],
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (x, y, w, h) = self.to_pdf(rect);
        let (r, g, b) = color.unit();
        let content = &mut self.page().content;
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        let (x, y, w, h) = self.to_pdf(rect);
        let (r, g, b) = color.unit();
        let content = &mut self.page().content;
        content.save_state();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(pt(line_width));
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, line_width: f32) {
        let height = self.page().height;
        let (r, g, b) = color.unit();
        let content = &mut self.page().content;
        content.save_state();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(pt(line_width));
        content.move_to(pt(from.0), height - pt(from.1));
        content.line_to(pt(to.0), height - pt(to.1));
        content.stroke();
        content.restore_state();
    }

    fn text(&mut self, run: &TextRun) {
        let name = self.font_name(run.face);
        let bytes = encode_win_ansi(&run.text);
        let height = self.page().height;
        let (r, g, b) = run.color.unit();
        let content = &mut self.page().content;
        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(Name(name.as_bytes()), run.size);
        if run.word_spacing != 0.0 {
            content.set_word_spacing(pt(run.word_spacing));
        }
        content.next_line(pt(run.x), height - pt(run.y));
        content.show(Str(&bytes));
        if run.word_spacing != 0.0 {
            content.set_word_spacing(0.0);
        }
        content.end_text();
    }

    fn image(&mut self, image: &DecodedImage, rect: Rect) {
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push(ImageData {
            name: name.clone(),
            jpeg: image.jpeg.clone(),
            width: image.width,
            height: image.height,
        });
        let (x, y, w, h) = self.to_pdf(rect);
        let content = &mut self.page().content;
        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    fn link(&mut self, rect: Rect, url: &str) {
        let (x, y, w, h) = self.to_pdf(rect);
        self.page()
            .links
            .push((PdfRect::new(x, y, x + w, y + h), url.to_string()));
    }
}

/// Encodes text for a WinAnsi base-14 font; unencodable chars become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}
