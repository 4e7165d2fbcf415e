//! JSON uploads in record or column orientation.
//!
//! - `[{"text": "...", "timestamp": "..."}, ...]`: each object is a row and
//!   keys become columns in first-seen order.
//! - `{"text": [...], "timestamp": [...]}`: top-level keys are columns and
//!   every array must have the same length.

use serde_json::{Map, Value};
use sentiment_model::{CellValue, FileKind, InputRecord, RecordSet};

use crate::decode::decode_utf8;
use crate::error::{IngestError, Result};

pub(crate) fn read_json(bytes: &[u8]) -> Result<RecordSet> {
    let content = decode_utf8(bytes, FileKind::Json)?;
    let root: Value = serde_json::from_str(content)?;
    match root {
        Value::Array(rows) => read_records(rows),
        Value::Object(columns) => read_columns(columns),
        other => Err(IngestError::JsonLayout {
            reason: format!(
                "expected an array of objects or an object of arrays, found {}",
                value_type(&other)
            ),
        }),
    }
}

fn read_records(rows: Vec<Value>) -> Result<RecordSet> {
    let mut set = RecordSet::new(FileKind::Json, Vec::new());
    for (idx, row) in rows.into_iter().enumerate() {
        let fields = match row {
            Value::Object(fields) => fields,
            other => {
                return Err(IngestError::JsonLayout {
                    reason: format!(
                        "row {} is {}, expected an object",
                        idx + 1,
                        value_type(&other)
                    ),
                });
            }
        };
        let mut record = InputRecord::new();
        for (column, value) in fields {
            if !set.has_column(&column) {
                set.columns.push(column.clone());
            }
            record.insert(column, cell_from_json(value));
        }
        set.push_record(record);
    }
    Ok(set)
}

fn read_columns(columns: Map<String, Value>) -> Result<RecordSet> {
    let mut names = Vec::with_capacity(columns.len());
    let mut values = Vec::with_capacity(columns.len());
    for (name, column) in columns {
        let cells = match column {
            Value::Array(cells) => cells,
            other => {
                return Err(IngestError::JsonLayout {
                    reason: format!(
                        "column '{name}' is {}, expected an array",
                        value_type(&other)
                    ),
                });
            }
        };
        names.push(name);
        values.push(cells);
    }

    let height = values.first().map_or(0, Vec::len);
    if let Some((name, cells)) = names
        .iter()
        .zip(&values)
        .find(|(_, cells)| cells.len() != height)
    {
        return Err(IngestError::JsonLayout {
            reason: format!(
                "column '{name}' has {} values, expected {height}",
                cells.len()
            ),
        });
    }

    let mut records = vec![InputRecord::new(); height];
    for (name, cells) in names.iter().zip(values) {
        for (record, value) in records.iter_mut().zip(cells) {
            record.insert(name.clone(), cell_from_json(value));
        }
    }

    let mut set = RecordSet::new(FileKind::Json, names);
    set.records = records;
    Ok(set)
}

fn cell_from_json(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(flag) => CellValue::Bool(flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => CellValue::Integer(integer),
            None => number
                .as_f64()
                .map_or_else(|| CellValue::Text(number.to_string()), CellValue::Float),
        },
        Value::String(text) => CellValue::Text(text),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
