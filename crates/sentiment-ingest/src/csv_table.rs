//! CSV uploads: first row is the header, every cell is text.

use csv::ReaderBuilder;
use sentiment_model::{CellValue, FileKind, InputRecord, RecordSet};
use tracing::warn;

use crate::decode::{decode_utf8, header_name};
use crate::error::Result;

pub(crate) fn read_csv(bytes: &[u8]) -> Result<RecordSet> {
    let content = decode_utf8(bytes, FileKind::Csv)?;
    // Strict field counts: a ragged row is malformed input, not padding.
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, raw)| header_name(raw, idx))
        .collect();
    warn_duplicate_headers(&headers);

    let mut set = RecordSet::new(FileKind::Csv, headers);
    for record in reader.records() {
        let record = record?;
        let mut row = InputRecord::new();
        for (column, value) in set.columns.iter().zip(record.iter()) {
            // First occurrence wins for duplicated header names.
            if !row.contains(column) {
                row.insert(column.clone(), CellValue::text_or_missing(value));
            }
        }
        set.push_record(row);
    }
    Ok(set)
}

fn warn_duplicate_headers(headers: &[String]) {
    for (idx, header) in headers.iter().enumerate() {
        if headers[..idx].contains(header) {
            warn!(column = %header, "duplicate CSV header; keeping the first column");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    #[test]
    fn reads_header_and_rows() {
        let set = read_csv(b"text,timestamp\nhello,2024-01-01\n,\n").unwrap();
        assert_eq!(set.columns, vec!["text", "timestamp"]);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.records[0].get("text"),
            Some(&CellValue::Text("hello".to_string()))
        );
        assert_eq!(set.records[1].get("text"), Some(&CellValue::Missing));
        assert_eq!(set.records[1].get("timestamp"), Some(&CellValue::Missing));
    }

    #[test]
    fn keeps_quoted_text_verbatim() {
        let set = read_csv(b"id,text\n1,\"Good, but \"\"slow\"\"\"\n").unwrap();
        assert_eq!(
            set.records[0].get("text"),
            Some(&CellValue::Text("Good, but \"slow\"".to_string()))
        );
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = read_csv(b"text,timestamp\nonly-one-field\n").unwrap_err();
        assert!(matches!(err, IngestError::Csv { .. }));
    }

    #[test]
    fn empty_payload_has_no_columns() {
        let set = read_csv(b"").unwrap();
        assert!(set.columns.is_empty());
        assert!(set.is_empty());
    }
}
