//! Error types for assembly and the upload pipeline.

use std::fmt;

use serde::Serialize;
use sentiment_ingest::{IngestError, IngestErrorKind};
use thiserror::Error;

/// Schema violations detected before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The record set has no `text` column at all.
    #[error("required column '{column}' not found (available columns: {available})")]
    MissingTextColumn {
        column: &'static str,
        available: String,
    },

    /// A record (JSON record orientation) omits the `text` key.
    #[error("row {row} has no '{column}' field")]
    MissingTextValue { row: usize, column: &'static str },
}

/// Stages of one upload, in order. A failure reports the last stage reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Received,
    Parsed,
    Validated,
    Scored,
    Assembled,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Parsed => "parsed",
            PipelineStage::Validated => "validated",
            PipelineStage::Scored => "scored",
            PipelineStage::Assembled => "assembled",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PipelineErrorKind {
    /// Extension outside csv/xlsx/json/txt.
    UnsupportedFormat,
    /// Bytes could not be decoded as the detected format.
    MalformedInput,
    /// Required `text` column missing.
    SchemaError,
    /// Unexpected fault inside the pipeline (e.g. a scorer panic).
    Internal,
}

/// Transport-level error class for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    Client,
    Server,
}

impl PipelineErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineErrorKind::UnsupportedFormat => "UnsupportedFormat",
            PipelineErrorKind::MalformedInput => "MalformedInput",
            PipelineErrorKind::SchemaError => "SchemaError",
            PipelineErrorKind::Internal => "Internal",
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            PipelineErrorKind::UnsupportedFormat | PipelineErrorKind::MalformedInput => {
                StatusClass::Client
            }
            PipelineErrorKind::SchemaError | PipelineErrorKind::Internal => StatusClass::Server,
        }
    }

    /// HTTP status an upload endpoint should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineErrorKind::UnsupportedFormat => 415,
            PipelineErrorKind::MalformedInput => 400,
            PipelineErrorKind::SchemaError | PipelineErrorKind::Internal => 500,
        }
    }
}

impl fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IngestErrorKind> for PipelineErrorKind {
    fn from(kind: IngestErrorKind) -> Self {
        match kind {
            IngestErrorKind::UnsupportedFormat => PipelineErrorKind::UnsupportedFormat,
            IngestErrorKind::MalformedInput => PipelineErrorKind::MalformedInput,
        }
    }
}

/// The single failure returned for an upload; no partial output accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} at stage '{stage}': {detail}")]
pub struct PipelineError {
    pub kind: PipelineErrorKind,
    pub stage: PipelineStage,
    pub detail: String,
}

impl PipelineError {
    pub fn new(kind: PipelineErrorKind, stage: PipelineStage, detail: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            detail: detail.into(),
        }
    }

    pub(crate) fn from_ingest(error: &IngestError, stage: PipelineStage) -> Self {
        Self::new(error.kind().into(), stage, error.to_string())
    }

    pub(crate) fn from_assemble(error: &AssembleError, stage: PipelineStage) -> Self {
        Self::new(PipelineErrorKind::SchemaError, stage, error.to_string())
    }
}

/// Result type for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            PipelineErrorKind::MalformedInput.status_class(),
            StatusClass::Client
        );
        assert_eq!(
            PipelineErrorKind::UnsupportedFormat.status_class(),
            StatusClass::Client
        );
        assert_eq!(
            PipelineErrorKind::SchemaError.status_class(),
            StatusClass::Server
        );
        assert_eq!(PipelineErrorKind::Internal.status_code(), 500);
        assert_eq!(PipelineErrorKind::UnsupportedFormat.status_code(), 415);
    }

    #[test]
    fn stages_are_ordered() {
        assert!(PipelineStage::Received < PipelineStage::Parsed);
        assert!(PipelineStage::Scored < PipelineStage::Assembled);
        assert!(PipelineStage::Assembled < PipelineStage::Done);
    }

    #[test]
    fn error_display_and_json() {
        let err = PipelineError::new(
            PipelineErrorKind::SchemaError,
            PipelineStage::Parsed,
            "required column 'text' not found",
        );
        assert_eq!(
            err.to_string(),
            "SchemaError at stage 'parsed': required column 'text' not found"
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "SchemaError");
        assert_eq!(json["stage"], "parsed");
    }
}
