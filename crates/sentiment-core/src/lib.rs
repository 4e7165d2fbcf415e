//! Sentiment scoring pipeline.
//!
//! Turns an uploaded file (csv, xlsx, json or txt) into a list of
//! [`OutputRecord`]s, each carrying the scored text, a sentiment label, the
//! signed compound score and the date/time split of an optional `timestamp`
//! column.
//!
//! ```no_run
//! use sentiment_core::process_upload;
//!
//! let records = process_upload(b"text\nI love this\n", "reviews.csv")?;
//! assert_eq!(records[0].id, 1);
//! # Ok::<(), sentiment_core::PipelineError>(())
//! ```

pub mod assemble;
pub mod error;
pub mod pipeline;
pub mod redact;
pub mod scorer;
pub mod timestamp;

pub use assemble::{AssembleOptions, RecordAssembler, ScoredText};
pub use error::{AssembleError, PipelineError, PipelineErrorKind, PipelineStage, Result, StatusClass};
pub use pipeline::{DEFAULT_PREVIEW_ROWS, Pipeline, PipelineOptions, process_upload};
pub use scorer::{PolarityScorer, VaderScorer, score_cell};
pub use timestamp::{TimestampNormalizer, parse_timestamp, parse_timestamp_text};

pub use sentiment_model::{OutputRecord, SentimentLabel, SentimentScore, SentimentSummary};
