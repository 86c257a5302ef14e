use deltapress_engine::{
    Delta, DisplayList, Orientation, PageSetup, PageSize, SourceLoader, generate_html,
    generate_pdf, layout_document, parse_delta, style::Base14Metrics,
};

fn long_delta() -> Delta {
    let json = serde_json::json!({
        "ops": (0..120)
            .map(|i| serde_json::json!({ "insert": format!("Paragraph number {i} with some words.\n") }))
            .collect::<Vec<_>>()
    });
    Delta::from_json(&json.to_string()).unwrap()
}

fn page_objects(pdf: &[u8]) -> usize {
    let text = String::from_utf8_lossy(pdf);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}

#[test]
fn output_is_a_pdf() {
    let delta = Delta::from_json(r#"{"ops":[{"insert":"Hello\n"}]}"#).unwrap();
    let pdf = generate_pdf(&delta, &PageSetup::default(), &SourceLoader::new());
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(page_objects(&pdf), 1);
}

#[test]
fn identical_input_gives_identical_bytes() {
    let delta = long_delta();
    let setup = PageSetup::default();
    let a = generate_pdf(&delta, &setup, &SourceLoader::new());
    let b = generate_pdf(&delta, &setup, &SourceLoader::new());
    assert_eq!(a, b);
}

#[test]
fn pdf_has_one_page_object_per_laid_out_page() {
    let delta = long_delta();
    let setup = PageSetup::default();

    let mut list = DisplayList::new();
    let report = layout_document(
        &parse_delta(&delta),
        &setup,
        &mut list,
        &Base14Metrics,
        &SourceLoader::new(),
    );
    assert!(report.pages > 1);

    let pdf = generate_pdf(&delta, &setup, &SourceLoader::new());
    assert_eq!(page_objects(&pdf), report.pages);
}

#[test]
fn landscape_media_box() {
    let delta = Delta::from_json(r#"[{"insert":"Wide\n"}]"#).unwrap();
    let setup = PageSetup {
        size: PageSize::Letter,
        orientation: Orientation::Landscape,
        ..PageSetup::default()
    };
    let pdf = generate_pdf(&delta, &setup, &SourceLoader::new());
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox [0 0 792 612]"));
}

#[test]
fn html_escapes_user_text() {
    let delta = Delta::from_json(r#"[{"insert":"1 < 2 & <b>x</b>\n"}]"#).unwrap();
    let html = generate_html(&delta, &PageSetup::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<p>1 &lt; 2 &amp; &lt;b&gt;x&lt;/b&gt;</p>"));
}
