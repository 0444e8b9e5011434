use crate::reader::Metadata;
use serde_json::Value;

/// Keys shown first, in this order; the rest follow sorted.
const LEADING_KEYS: [&str; 2] = ["Title", "Author"];

/// Render document metadata as a header block for the extracted text.
pub fn format_metadata(metadata: &Metadata) -> String {
    let mut lines = Vec::new();

    for key in LEADING_KEYS {
        if let Some(value) = metadata.get(key) {
            lines.push(format!("{}: {}", key, display_value(value)));
        }
    }

    for (key, value) in metadata {
        if LEADING_KEYS.contains(&key.as_str()) {
            continue;
        }
        lines.push(format!("{}: {}", key, display_value(value)));
    }

    if lines.is_empty() {
        return String::new();
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n") + "\n"
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
