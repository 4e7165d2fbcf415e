//! Upload ingestion.
//!
//! Turns a fully buffered upload and its declared filename into a
//! [`RecordSet`]. The format is chosen by extension alone (case-insensitive):
//!
//! - **csv**: UTF-8, first row is the header, strict field counts
//! - **xlsx**: first worksheet, first row is the header
//! - **json**: array of objects, or object of equal-length arrays
//! - **txt**: one record per line in a synthesized `text` column
//!
//! # Example
//!
//! ```ignore
//! use sentiment_ingest::parse;
//!
//! let set = parse(b"text\nGreat product\n", "reviews.csv")?;
//! assert_eq!(set.len(), 1);
//! ```

mod csv_table;
mod decode;
mod error;
mod json_table;
mod text_lines;
mod xlsx_table;

use sentiment_model::{FileKind, RecordSet};
use tracing::debug;

// === Error Types ===
pub use error::{IngestError, IngestErrorKind, Result};

/// Detect the upload format from `filename`.
pub fn detect_kind(filename: &str) -> Result<FileKind> {
    FileKind::from_filename(filename).ok_or_else(|| IngestError::UnsupportedFormat {
        filename: filename.to_string(),
    })
}

/// Parse an upload, selecting the reader by the filename's extension.
///
/// Unsupported extensions fail before any byte is decoded.
pub fn parse(bytes: &[u8], filename: &str) -> Result<RecordSet> {
    let kind = detect_kind(filename)?;
    parse_as(bytes, kind)
}

/// Parse an upload with an already-known format.
pub fn parse_as(bytes: &[u8], kind: FileKind) -> Result<RecordSet> {
    let set = match kind {
        FileKind::Csv => csv_table::read_csv(bytes)?,
        FileKind::Xlsx => xlsx_table::read_xlsx(bytes)?,
        FileKind::Json => json_table::read_json(bytes)?,
        FileKind::Txt => text_lines::read_txt(bytes)?,
    };
    debug!(
        kind = %kind,
        bytes = bytes.len(),
        columns = set.columns.len(),
        rows = set.len(),
        "parsed upload"
    );
    Ok(set)
}
