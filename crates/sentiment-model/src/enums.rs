//! Type-safe enumerations for upload handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upload format, selected solely by the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Comma-separated values with a header row.
    Csv,
    /// Office Open XML workbook; first sheet, first row as header.
    Xlsx,
    /// Array of objects or object of equal-length arrays.
    Json,
    /// One record per line, single `text` column.
    Txt,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [
        FileKind::Csv,
        FileKind::Xlsx,
        FileKind::Json,
        FileKind::Txt,
    ];

    /// Returns the canonical (lowercase) extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Xlsx => "xlsx",
            FileKind::Json => "json",
            FileKind::Txt => "txt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FileKind::Csv => "Comma-separated values, first row is the header",
            FileKind::Xlsx => "Excel workbook, first sheet, first row is the header",
            FileKind::Json => "Array of objects, or object of equal-length column arrays",
            FileKind::Txt => "Plain text, one record per line in a `text` column",
        }
    }

    /// Detects the kind from a filename, looking only at the extension.
    ///
    /// Returns `None` when the name has no extension or an unrecognized one.
    pub fn from_filename(filename: &str) -> Option<Self> {
        // Only the final path component matters; `a.csv/upload` has no extension.
        let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let (stem, extension) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        extension.parse().ok()
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = String;

    /// Parse an extension (case-insensitive, without the leading dot).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" => Ok(FileKind::Xlsx),
            "json" => Ok(FileKind::Json),
            "txt" => Ok(FileKind::Txt),
            _ => Err(format!("unsupported file extension: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_extension_case_insensitively() {
        assert_eq!(FileKind::from_filename("reviews.CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_filename("Book1.Xlsx"), Some(FileKind::Xlsx));
        assert_eq!(FileKind::from_filename("a.b.json"), Some(FileKind::Json));
        assert_eq!(FileKind::from_filename("dir/notes.txt"), Some(FileKind::Txt));
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert_eq!(FileKind::from_filename("report.pdf"), None);
        assert_eq!(FileKind::from_filename("README"), None);
        assert_eq!(FileKind::from_filename(".csv"), None);
        assert_eq!(FileKind::from_filename("data.csv/upload"), None);
        assert_eq!(FileKind::from_filename(""), None);
    }
}
