use crate::format::DocumentFormat;
use thiserror::Error;

/// Failures raised by the extraction pipeline.
///
/// Recoverable degradations (text encoding fallback, skipped EPUB chapters)
/// are logged and never surface here.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("invalid EPUB: {0}")]
    InvalidContainer(String),
    #[error("failed to parse {format} document: {message}")]
    ParseFailure {
        format: DocumentFormat,
        message: String,
    },
}

impl ExtractError {
    pub(crate) fn invalid_container(message: impl Into<String>) -> Self {
        Self::InvalidContainer(message.into())
    }

    pub(crate) fn parse_failure(format: DocumentFormat, message: impl Into<String>) -> Self {
        Self::ParseFailure {
            format,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
