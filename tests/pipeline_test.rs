//! Integration tests for the extraction pipeline entry point.
//!
//! EPUB fixtures are assembled in memory with the zip writer.

use book_extract::{parse_file_content, DocumentFormat, ExtractError};
use proptest::prelude::*;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

const EPUB: &str = "application/epub+zip";

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

fn chapter(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head><title>{title}</title></head>
  <body>
    <p>{body}</p>
  </body>
</html>"#
    )
}

fn package(spine: &[&str]) -> String {
    let itemrefs: String = spine
        .iter()
        .map(|id| format!(r#"<itemref idref="{id}"/>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="id">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Test Book</dc:title></metadata>
  <manifest>
    <item id="ch1" href="ch1.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch2" href="ch2.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>{itemrefs}</spine>
</package>"#
    )
}

fn build_epub(spine: &[&str]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let entries = [
        ("mimetype", EPUB.to_string()),
        ("META-INF/container.xml", CONTAINER_XML.to_string()),
        ("OEBPS/content.opf", package(spine)),
        ("OEBPS/ch1.xhtml", chapter("One", "It was the best of times.")),
        ("OEBPS/ch2.xhtml", chapter("Two", "It was the worst of times.")),
    ];
    for (name, body) in entries {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn epub_chapters_follow_spine_order() {
    let data = build_epub(&["ch1", "ch2"]);
    let result = parse_file_content(&data, EPUB).unwrap();
    assert_eq!(
        result.text,
        "It was the best of times.\n\nIt was the worst of times.\n\n"
    );
    assert!(result.metadata.is_none());
}

#[test]
fn epub_spine_order_overrides_manifest_order() {
    let data = build_epub(&["ch2", "ch1"]);
    let result = parse_file_content(&data, EPUB).unwrap();
    assert_eq!(
        result.text,
        "It was the worst of times.\n\nIt was the best of times.\n\n"
    );
}

#[test]
fn epub_unknown_spine_id_is_skipped() {
    let data = build_epub(&["ch2", "nope", "ch1"]);
    let result = parse_file_content(&data, EPUB).unwrap();
    assert_eq!(
        result.text,
        "It was the worst of times.\n\nIt was the best of times.\n\n"
    );
}

#[test]
fn epub_that_is_not_a_zip_is_invalid_container() {
    let err = parse_file_content(b"definitely not a zip archive", EPUB).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidContainer(_)), "{err:?}");
}

#[test]
fn dispatch_covers_every_mime_type() {
    let garbage = b"\x00\x01 truncated";

    match parse_file_content(garbage, "application/pdf") {
        Err(ExtractError::ParseFailure { format, .. }) => assert_eq!(format, DocumentFormat::Pdf),
        other => panic!("pdf: {other:?}"),
    }

    assert!(matches!(
        parse_file_content(garbage, EPUB),
        Err(ExtractError::InvalidContainer(_))
    ));

    let text = parse_file_content(b"plain words", "text/plain").unwrap();
    assert_eq!(text.text, "plain words");

    for mime in [
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ] {
        match parse_file_content(garbage, mime) {
            Err(ExtractError::ParseFailure { format, .. }) => {
                assert_eq!(format, DocumentFormat::Word)
            }
            other => panic!("{mime}: {other:?}"),
        }
    }

    match parse_file_content(garbage, "application/octet-stream") {
        Err(ExtractError::UnsupportedFormat(mime)) => assert_eq!(mime, "application/octet-stream"),
        other => panic!("unknown: {other:?}"),
    }
}

#[test]
fn unsupported_format_ignores_buffer_contents() {
    let data = build_epub(&["ch1"]);
    assert!(matches!(
        parse_file_content(&data, "application/zip"),
        Err(ExtractError::UnsupportedFormat(_))
    ));
}

#[test]
fn repeated_epub_extraction_is_identical() {
    let data = build_epub(&["ch1", "ch2"]);
    let first = parse_file_content(&data, EPUB).unwrap();
    let second = parse_file_content(&data, EPUB).unwrap();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn plain_text_always_decodes(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let first = parse_file_content(&data, "text/plain");
        prop_assert!(first.is_ok());
        let second = parse_file_content(&data, "text/plain");
        prop_assert_eq!(first.unwrap().text, second.unwrap().text);
    }
}
