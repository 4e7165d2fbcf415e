use chrono::NaiveDateTime;

/// A single raw cell from an uploaded file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Spreadsheet date-time cell, already decoded from its serial form.
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    /// Wraps text, treating an empty string as missing.
    pub fn text_or_missing(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Renders the value as text. `Missing` becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => format_numeric(*value),
            CellValue::Bool(value) => value.to_string(),
            CellValue::DateTime(value) => value.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            CellValue::Missing => String::new(),
        }
    }

    /// Interprets the value as a positive integer identifier.
    pub fn as_positive_id(&self) -> Option<u64> {
        match self {
            CellValue::Integer(value) => u64::try_from(*value).ok().filter(|id| *id > 0),
            CellValue::Float(value) => {
                if value.fract() == 0.0 && *value >= 1.0 && *value <= u64::MAX as f64 {
                    Some(*value as u64)
                } else {
                    None
                }
            }
            CellValue::Text(value) => value.trim().parse::<u64>().ok().filter(|id| *id > 0),
            CellValue::Bool(_) | CellValue::DateTime(_) | CellValue::Missing => None,
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
