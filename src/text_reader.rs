use crate::reader::ParseResult;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Outcome of sniffing a plain-text buffer for its character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub encoding: &'static Encoding,
    /// Length of a leading byte-order mark, if one decided the encoding
    pub bom_len: usize,
}

/// Decode a plain-text buffer of unknown encoding. Never fails: anything
/// that cannot be detected or decoded falls back to lossy UTF-8.
pub fn extract_text(data: &[u8]) -> ParseResult {
    ParseResult::text(decode(data, detect_encoding(data)))
}

/// A byte-order mark wins outright; otherwise the statistical guess is only
/// trusted when the detector assesses it as confident. An empty buffer has
/// nothing to detect.
pub fn detect_encoding(data: &[u8]) -> Option<Detection> {
    if data.is_empty() {
        return None;
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        return Some(Detection { encoding, bom_len });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let (encoding, confident) = detector.guess_assess(None, true);
    if !confident {
        return None;
    }

    Some(Detection {
        encoding,
        bom_len: 0,
    })
}

pub fn decode(data: &[u8], detection: Option<Detection>) -> String {
    let Some(detection) = detection else {
        warn!("Could not detect encoding, falling back to UTF-8");
        return utf8_lossy(data);
    };

    let name = detection.encoding.name();
    match detection
        .encoding
        .decode_without_bom_handling_and_without_replacement(&data[detection.bom_len..])
    {
        Some(text) => {
            debug!(encoding = name, bytes = data.len(), "Decoded plain text");
            text.into_owned()
        }
        None => {
            warn!(encoding = name, "Failed to decode, falling back to UTF-8");
            utf8_lossy(&data[detection.bom_len..])
        }
    }
}

fn utf8_lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}
