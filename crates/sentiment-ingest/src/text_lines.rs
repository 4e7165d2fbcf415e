//! Plain-text uploads: one record per line under a synthesized `text` column.

use sentiment_model::{CellValue, FileKind, InputRecord, RecordSet, TEXT_COLUMN};

use crate::decode::decode_utf8;
use crate::error::Result;

pub(crate) fn read_txt(bytes: &[u8]) -> Result<RecordSet> {
    let content = decode_utf8(bytes, FileKind::Txt)?;
    let mut set = RecordSet::new(FileKind::Txt, vec![TEXT_COLUMN.to_string()]);
    for line in content.lines() {
        let mut record = InputRecord::new();
        record.insert(TEXT_COLUMN, CellValue::Text(line.to_string()));
        set.push_record(record);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(set: &RecordSet) -> Vec<String> {
        set.records
            .iter()
            .map(|record| record.get(TEXT_COLUMN).map(CellValue::to_text).unwrap_or_default())
            .collect()
    }

    #[test]
    fn every_line_is_a_record() {
        let set = read_txt(b"I love this\n\nThis is terrible").unwrap();
        assert_eq!(texts(&set), vec!["I love this", "", "This is terrible"]);
    }

    #[test]
    fn trailing_newline_and_crlf() {
        let set = read_txt(b"first\r\nsecond\r\n").unwrap();
        assert_eq!(texts(&set), vec!["first", "second"]);
    }

    #[test]
    fn empty_file_has_text_column_and_no_rows() {
        let set = read_txt(b"").unwrap();
        assert_eq!(set.columns, vec![TEXT_COLUMN]);
        assert!(set.is_empty());
    }
}
