//! Per-row assembly of scored output records.
//!
//! Assembly runs in three steps that the pipeline observes separately:
//!
//! 1. [`RecordAssembler::validate`]: the `text` column must exist in the set
//!    and in every record; otherwise the whole batch is rejected.
//! 2. [`RecordAssembler::score`]: every `text` value is scored in row order.
//! 3. [`RecordAssembler::project`]: labels, signed confidence, timestamp
//!    parts and ids are merged into the fixed output schema.

use std::sync::Arc;

use sentiment_model::{
    CellValue, ID_COLUMN, InputRecord, OutputRecord, RecordSet, SentimentLabel, SentimentScore,
    TEXT_COLUMN, TIMESTAMP_COLUMN,
};
use tracing::{trace, warn};

use crate::error::AssembleError;
use crate::redact::redact_value;
use crate::scorer::{PolarityScorer, score_cell};
use crate::timestamp::TimestampNormalizer;

/// Options controlling output projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Take ids from a source `id` column when one exists.
    pub use_source_ids: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            use_source_ids: true,
        }
    }
}

impl AssembleOptions {
    /// Always number rows by position.
    #[must_use]
    pub fn row_positions() -> Self {
        Self {
            use_source_ids: false,
        }
    }

    #[must_use]
    pub fn with_source_ids(mut self, enable: bool) -> Self {
        self.use_source_ids = enable;
        self
    }
}

/// The text that was scored and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredText {
    pub text: String,
    pub score: SentimentScore,
}

/// Builds output records from a parsed record set.
#[derive(Clone)]
pub struct RecordAssembler {
    scorer: Arc<dyn PolarityScorer>,
    options: AssembleOptions,
}

impl std::fmt::Debug for RecordAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordAssembler")
            .field("scorer", &self.scorer.name())
            .field("options", &self.options)
            .finish()
    }
}

impl RecordAssembler {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self {
            scorer,
            options: AssembleOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> AssembleOptions {
        self.options
    }

    pub fn scorer(&self) -> &dyn PolarityScorer {
        self.scorer.as_ref()
    }

    /// Validate, score and project in one call.
    pub fn assemble(&self, set: &RecordSet) -> Result<Vec<OutputRecord>, AssembleError> {
        self.validate(set)?;
        let scored = self.score(set);
        Ok(self.project(set, scored))
    }

    /// Checks the `text` column before any row-level work.
    pub fn validate(&self, set: &RecordSet) -> Result<(), AssembleError> {
        if !set.has_column(TEXT_COLUMN) {
            return Err(AssembleError::MissingTextColumn {
                column: TEXT_COLUMN,
                available: describe_columns(&set.columns),
            });
        }
        if let Some(idx) = set
            .records
            .iter()
            .position(|record| !record.contains(TEXT_COLUMN))
        {
            return Err(AssembleError::MissingTextValue {
                row: idx + 1,
                column: TEXT_COLUMN,
            });
        }
        Ok(())
    }

    /// Scores the `text` value of every record, in row order.
    pub fn score(&self, set: &RecordSet) -> Vec<ScoredText> {
        set.records
            .iter()
            .map(|record| {
                let (text, score) = score_cell(self.scorer.as_ref(), record.get(TEXT_COLUMN));
                ScoredText { text, score }
            })
            .collect()
    }

    /// Merges scores with timestamps and ids into output records.
    ///
    /// `scored` must come from [`RecordAssembler::score`] on the same set.
    pub fn project(&self, set: &RecordSet, scored: Vec<ScoredText>) -> Vec<OutputRecord> {
        let timestamps = TimestampNormalizer::for_record_set(set);
        let source_ids = self.options.use_source_ids && set.has_column(ID_COLUMN);

        set.records
            .iter()
            .zip(scored)
            .enumerate()
            .map(|(idx, (record, scored))| {
                let position = idx as u64 + 1;
                let id = if source_ids {
                    source_id(record, position)
                } else {
                    position
                };
                let parts = timestamps.normalize(record.get(TIMESTAMP_COLUMN));
                let label = SentimentLabel::from_compound(scored.score.compound);
                trace!(
                    id,
                    label = %label,
                    compound = scored.score.compound,
                    text = %redact_value(&scored.text),
                    "assembled row"
                );
                OutputRecord {
                    id,
                    date: parts.date,
                    time: parts.time,
                    text: scored.text,
                    sentiment_label: label,
                    sentiment_confidence: scored.score.compound,
                }
            })
            .collect()
    }
}

fn source_id(record: &InputRecord, position: u64) -> u64 {
    match record.get(ID_COLUMN).and_then(CellValue::as_positive_id) {
        Some(id) => id,
        None => {
            warn!(
                row = position,
                "source id is not a positive integer; using row position"
            );
            position
        }
    }
}

fn describe_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        "none".to_string()
    } else {
        columns.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_model::{DatePart, FileKind, TimePart};

    /// Scores by counting "good" (+) and "bad" (-) words.
    struct WordCountScorer;

    impl PolarityScorer for WordCountScorer {
        fn score(&self, text: &str) -> SentimentScore {
            let good = text.matches("good").count() as f64;
            let bad = text.matches("bad").count() as f64;
            let compound = ((good - bad) / 4.0).clamp(-1.0, 1.0);
            SentimentScore {
                compound,
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
            }
        }

        fn name(&self) -> &'static str {
            "word-count"
        }
    }

    fn assembler() -> RecordAssembler {
        RecordAssembler::new(Arc::new(WordCountScorer))
    }

    fn set(columns: &[&str], rows: &[&[(&str, CellValue)]]) -> RecordSet {
        let mut set = RecordSet::new(
            FileKind::Json,
            columns.iter().map(|c| (*c).to_string()).collect(),
        );
        for row in rows {
            set.push_record(row.iter().cloned().collect());
        }
        set
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn missing_text_column_fails_whole_batch() {
        let set = set(&["body"], &[&[("body", text("good"))]]);
        let err = assembler().assemble(&set).unwrap_err();
        assert_eq!(
            err,
            AssembleError::MissingTextColumn {
                column: TEXT_COLUMN,
                available: "body".to_string(),
            }
        );
    }

    #[test]
    fn record_without_text_key_fails_whole_batch() {
        let set = set(
            &["text", "note"],
            &[&[("text", text("good"))], &[("note", text("x"))]],
        );
        let err = assembler().assemble(&set).unwrap_err();
        assert_eq!(
            err,
            AssembleError::MissingTextValue {
                row: 2,
                column: TEXT_COLUMN
            }
        );
    }

    #[test]
    fn labels_and_signed_confidence() {
        let set = set(
            &["text"],
            &[
                &[("text", text("good good"))],
                &[("text", text("bad"))],
                &[("text", text("nothing"))],
            ],
        );
        let out = assembler().assemble(&set).unwrap();
        let labels: Vec<_> = out.iter().map(|r| r.sentiment_label).collect();
        assert_eq!(
            labels,
            vec![
                SentimentLabel::Positive,
                SentimentLabel::Negative,
                SentimentLabel::Neutral
            ]
        );
        assert_eq!(out[0].sentiment_confidence, 0.5);
        assert_eq!(out[1].sentiment_confidence, -0.25);
        assert_eq!(out[2].sentiment_confidence, 0.0);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(out.iter().all(|r| r.date == DatePart::Unavailable));
        assert!(out.iter().all(|r| r.time == TimePart::Unavailable));
    }

    #[test]
    fn source_ids_are_used_when_present() {
        let set = set(
            &["id", "text"],
            &[
                &[("id", CellValue::Integer(40)), ("text", text("good"))],
                &[("id", text("oops")), ("text", text("good"))],
                &[("id", CellValue::Float(7.0)), ("text", text("good"))],
            ],
        );
        let out = assembler().assemble(&set).unwrap();
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![40, 2, 7]);

        assert_eq!(
            AssembleOptions::default().with_source_ids(false),
            AssembleOptions::row_positions()
        );
        let positional = assembler()
            .with_options(AssembleOptions::default().with_source_ids(false))
            .assemble(&set)
            .unwrap();
        assert_eq!(
            positional.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn extra_columns_are_not_echoed_and_missing_text_is_empty() {
        let set = set(
            &["text", "author"],
            &[&[("text", CellValue::Missing), ("author", text("bad actor"))]],
        );
        let out = assembler().assemble(&set).unwrap();
        assert_eq!(out[0].text, "");
        assert_eq!(out[0].sentiment_label, SentimentLabel::Neutral);
        let json = serde_json::to_value(&out[0]).unwrap();
        assert!(json.get("author").is_none());
    }

    #[test]
    fn bad_timestamp_only_affects_its_row() {
        let set = set(
            &["text", "timestamp"],
            &[
                &[("text", text("good")), ("timestamp", text("not-a-date"))],
                &[("text", text("good")), ("timestamp", text("2024-02-29 12:00:00"))],
            ],
        );
        let out = assembler().assemble(&set).unwrap();
        assert_eq!(out[0].date, DatePart::Unavailable);
        assert_eq!(out[0].time, TimePart::Unavailable);
        assert_eq!(out[1].date.to_string(), "2024-02-29");
        assert_eq!(out[1].time.to_string(), "12:00:00");
    }

    #[test]
    fn empty_set_with_text_column_is_empty_output() {
        let set = set(&["text"], &[]);
        assert!(assembler().assemble(&set).unwrap().is_empty());
    }
}
