//! Data model shared by the sentiment ingest crates.
//!
//! Parsed uploads are represented as a [`RecordSet`] of schema-less
//! [`InputRecord`]s whose cells are tagged [`CellValue`]s. Scoring yields a
//! [`SentimentScore`], and every input row is projected to exactly one
//! [`OutputRecord`].

pub mod enums;
pub mod output;
pub mod record;
pub mod sentiment;
pub mod timestamp;
pub mod value;

pub use enums::FileKind;
pub use output::OutputRecord;
pub use record::{ID_COLUMN, InputRecord, RecordSet, TEXT_COLUMN, TIMESTAMP_COLUMN};
pub use sentiment::{SentimentLabel, SentimentScore, SentimentSummary};
pub use timestamp::{DatePart, TimePart, TimestampParts, UNAVAILABLE};
pub use value::{CellValue, format_numeric};
