//! Byte-level helpers shared by the text-based readers.

use sentiment_model::FileKind;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Decode an upload as UTF-8, dropping a leading byte-order mark.
///
/// UTF-16 payloads are recognized by their BOM and reported as such rather
/// than as a generic decode failure.
pub(crate) fn decode_utf8(bytes: &[u8], kind: FileKind) -> Result<&str> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                kind,
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                kind,
                encoding: "UTF-16 BE",
            });
        }
    }
    let text =
        std::str::from_utf8(bytes).map_err(|source| IngestError::InvalidUtf8 { kind, source })?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

/// Header names are kept verbatim; only empty headers get a positional name.
pub(crate) fn header_name(raw: &str, index: usize) -> String {
    if raw.is_empty() {
        format!("column_{}", index + 1)
    } else {
        raw.to_string()
    }
}
