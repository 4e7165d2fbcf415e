//! Error types for upload ingestion.

use sentiment_model::FileKind;
use thiserror::Error;

/// Coarse classification used by callers that only care whether the
/// upload was rejected for its name or for its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestErrorKind {
    UnsupportedFormat,
    MalformedInput,
}

/// Errors that can occur while decoding an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Format Detection ===
    /// Filename has no extension, or one outside the supported set.
    #[error("unsupported file format: '{filename}' (expected .csv, .xlsx, .json or .txt)")]
    UnsupportedFormat { filename: String },

    // === Text Decoding ===
    /// Payload carries a byte-order mark for an encoding other than UTF-8.
    #[error("unsupported {encoding} encoding in {kind} upload (UTF-8 required)")]
    UnsupportedEncoding {
        kind: FileKind,
        encoding: &'static str,
    },

    /// Payload is not valid UTF-8.
    #[error("invalid UTF-8 in {kind} upload: {source}")]
    InvalidUtf8 {
        kind: FileKind,
        #[source]
        source: std::str::Utf8Error,
    },

    // === Structural Errors ===
    /// CSV reader rejected the content (ragged rows, bad quoting).
    #[error("failed to parse CSV: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Content is not valid JSON.
    #[error("failed to parse JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that is not a table.
    #[error("unsupported JSON layout: {reason}")]
    JsonLayout { reason: String },

    /// Workbook container could not be opened or read.
    #[error("failed to read workbook: {source}")]
    Workbook {
        #[source]
        source: calamine::XlsxError,
    },

    /// Workbook opened but contains no worksheets.
    #[error("workbook contains no worksheets")]
    NoWorksheet,
}

impl IngestError {
    pub fn kind(&self) -> IngestErrorKind {
        match self {
            IngestError::UnsupportedFormat { .. } => IngestErrorKind::UnsupportedFormat,
            _ => IngestErrorKind::MalformedInput,
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

impl From<calamine::XlsxError> for IngestError {
    fn from(source: calamine::XlsxError) -> Self {
        Self::Workbook { source }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
