//! MIME-type routing to the per-format extractors.

use crate::error::{ExtractError, Result};
use crate::reader::ParseResult;
use crate::{docx_reader, epub_reader, pdf_reader, text_reader};
use std::fmt;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_EPUB: &str = "application/epub+zip";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The closed set of document formats the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Epub,
    PlainText,
    /// Word-family documents (`.doc` and `.docx` share one extractor)
    Word,
}

impl DocumentFormat {
    /// Every MIME type accepted by [`DocumentFormat::from_mime_type`].
    pub fn mime_types() -> &'static [&'static str] {
        &[MIME_PDF, MIME_EPUB, MIME_TEXT, MIME_DOC, MIME_DOCX]
    }

    /// Route a declared MIME type to its format. Matching is exact.
    pub fn from_mime_type(mime_type: &str) -> Result<Self> {
        match mime_type {
            MIME_PDF => Ok(Self::Pdf),
            MIME_EPUB => Ok(Self::Epub),
            MIME_TEXT => Ok(Self::PlainText),
            MIME_DOC | MIME_DOCX => Ok(Self::Word),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Run the extractor for this format over a complete in-memory buffer.
    pub fn extract(self, data: &[u8]) -> Result<ParseResult> {
        match self {
            Self::Pdf => pdf_reader::extract_pdf(data),
            Self::Epub => epub_reader::extract_epub(data),
            Self::PlainText => Ok(text_reader::extract_text(data)),
            Self::Word => docx_reader::extract_docx(data),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Epub => "EPUB",
            Self::PlainText => "plain text",
            Self::Word => "Word",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
