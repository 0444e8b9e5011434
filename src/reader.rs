use serde::Serialize;
use std::collections::BTreeMap;

/// Format-specific document metadata (e.g. a PDF's info dictionary).
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Shared extraction result across all input formats
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    /// Full plain-text content; empty when the document has no text
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ParseResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata: Some(metadata),
        }
    }
}
