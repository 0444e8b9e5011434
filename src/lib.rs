//! Plain-text extraction for uploaded e-books.
//!
//! [`parse_file_content`] takes a complete in-memory buffer and its declared
//! MIME type and returns the document's text, plus format metadata where the
//! format carries any. Each call is self-contained: nothing is cached or
//! shared between calls.

pub mod docx_reader;
pub mod epub_package;
pub mod epub_reader;
pub mod error;
pub mod format;
pub mod html_text;
pub mod metadata;
pub mod pdf_reader;
pub mod reader;
pub mod text_reader;

pub use error::{ExtractError, Result};
pub use format::DocumentFormat;
pub use reader::{Metadata, ParseResult};

use tracing::debug;

/// Extract the text of `data`, routed by its declared MIME type.
///
/// Unknown MIME types fail with [`ExtractError::UnsupportedFormat`] before
/// the buffer is looked at.
pub fn parse_file_content(data: &[u8], mime_type: &str) -> Result<ParseResult> {
    let format = DocumentFormat::from_mime_type(mime_type)?;
    debug!(%format, bytes = data.len(), "Extracting document content");
    format.extract(data)
}
