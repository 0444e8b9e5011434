use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;
use crate::reader::{Metadata, ParseResult};
use lopdf::{Dictionary, Document, Object};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Readers accept a header anywhere in the first kilobyte.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extract the full text of a PDF, pages in document order, together with
/// the entries of its info dictionary.
///
/// Documents with little or no extractable text (scans) are returned as-is;
/// only a structurally unreadable buffer is an error.
pub fn extract_pdf(data: &[u8]) -> Result<ParseResult> {
    if !has_pdf_header(data) {
        return Err(failure("missing %PDF- header"));
    }

    let doc = Document::load_mem(data).map_err(|e| failure(format!("Failed to load PDF: {e}")))?;
    let metadata = document_metadata(&doc);

    let text = match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(failure(format!("Failed to extract text: {e}"))),
        Err(_) => return Err(failure("text extractor crashed on malformed content")),
    };

    if text.trim().is_empty() {
        warn!("PDF appears to be scanned or has no extractable text");
    }

    info!(
        pages = doc.get_pages().len(),
        total_chars = text.len(),
        metadata_keys = metadata.len(),
        "Extracted PDF text"
    );

    Ok(ParseResult::with_metadata(text, metadata))
}

fn failure(message: impl Into<String>) -> ExtractError {
    ExtractError::parse_failure(DocumentFormat::Pdf, message)
}

fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

fn document_metadata(doc: &Document) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("PDFFormatVersion".to_string(), Value::from(doc.version.clone()));

    let acroform = doc.catalog().map(|c| c.has(b"AcroForm")).unwrap_or(false);
    metadata.insert("IsAcroFormPresent".to_string(), Value::Bool(acroform));

    let Some(info) = info_dictionary(doc) else {
        debug!("PDF has no info dictionary");
        return metadata;
    };

    for (key, value) in info.iter() {
        let key = String::from_utf8_lossy(key).into_owned();
        match resolve(doc, value).and_then(object_to_value) {
            Some(value) => {
                metadata.insert(key, value);
            }
            None => debug!(key = %key, "Skipping non-scalar info entry"),
        }
    }

    metadata
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    resolve(doc, info)?.as_dict().ok()
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn object_to_value(object: &Object) -> Option<Value> {
    match object {
        Object::Boolean(b) => Some(Value::Bool(*b)),
        Object::Integer(i) => Some(Value::from(*i)),
        Object::Real(r) => serde_json::Number::from_f64(f64::from(*r)).map(Value::Number),
        Object::Name(name) => Some(Value::String(String::from_utf8_lossy(name).into_owned())),
        Object::String(bytes, _) => Some(Value::String(decode_text_string(bytes))),
        _ => None,
    }
}

/// PDF text strings are UTF-16BE when they carry a BOM and PDFDocEncoding
/// otherwise; the latter agrees with Latin-1 for printable text.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (text, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
