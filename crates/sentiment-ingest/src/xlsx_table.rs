//! XLSX uploads: first worksheet, first row as header.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook_from_rs};
use sentiment_model::{CellValue, FileKind, InputRecord, RecordSet};
use tracing::debug;

use crate::decode::header_name;
use crate::error::{IngestError, Result};

pub(crate) fn read_xlsx(bytes: &[u8]) -> Result<RecordSet> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!("first worksheet is empty");
        return Ok(RecordSet::new(FileKind::Xlsx, Vec::new()));
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(&header_text(cell), idx))
        .collect();

    let mut set = RecordSet::new(FileKind::Xlsx, headers);
    for row in rows {
        let mut record = InputRecord::new();
        for (column, cell) in set.columns.iter().zip(row) {
            if !record.contains(column) {
                record.insert(column.clone(), cell_from_xlsx(cell));
            }
        }
        set.push_record(record);
    }
    Ok(set)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

fn cell_from_xlsx(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(value) => CellValue::text_or_missing(value.as_str()),
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::Text(cell.to_string()), CellValue::DateTime),
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::Text(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_container_is_malformed() {
        let err = read_xlsx(b"PK\x03\x04 definitely not a workbook").unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(cell_from_xlsx(&Data::Empty), CellValue::Missing);
        assert_eq!(cell_from_xlsx(&Data::Int(3)), CellValue::Integer(3));
        assert_eq!(
            cell_from_xlsx(&Data::String("ok".to_string())),
            CellValue::Text("ok".to_string())
        );
        assert_eq!(
            cell_from_xlsx(&Data::DateTimeIso("2024-01-15T10:30:00".to_string())),
            CellValue::Text("2024-01-15T10:30:00".to_string())
        );
    }
}
