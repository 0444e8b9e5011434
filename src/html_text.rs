use scraper::{ElementRef, Html};

/// Text content of a chapter document's `<body>`, trimmed.
///
/// Text nodes are concatenated exactly as they appear, so inline markup
/// does not introduce extra spacing.
pub fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let body = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body");

    match body {
        Some(body) => body.text().collect::<String>().trim().to_string(),
        None => String::new(),
    }
}
