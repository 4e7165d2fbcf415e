#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::{CellValue, FileKind};

/// Column holding the text to score. Required.
pub const TEXT_COLUMN: &str = "text";
/// Optional column holding a raw timestamp.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Optional column holding caller-supplied record identifiers.
pub const ID_COLUMN: &str = "id";

/// One parsed row: column name to raw value.
///
/// Column order lives on the owning [`RecordSet`]; a record only answers
/// lookups by name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputRecord {
    pub cells: BTreeMap<String, CellValue>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value))
                .collect(),
        }
    }
}

/// Every row parsed from one upload, in source order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordSet {
    pub kind: FileKind,
    /// Column names in source order.
    pub columns: Vec<String>,
    pub records: Vec<InputRecord>,
}

impl RecordSet {
    pub fn new(kind: FileKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            records: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: InputRecord) {
        self.records.push(record);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
