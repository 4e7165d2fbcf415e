//! Polarity scores, labels, and per-label summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::OutputRecord;

/// Result of scoring one text value.
///
/// `positive + negative + neutral` is expected to be close to 1; that is the
/// scorer's contract and is not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Overall polarity in `[-1, 1]`.
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentScore {
    /// Score assigned to empty text.
    pub const NEUTRAL: SentimentScore = SentimentScore {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    };

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Sign of the compound score; exactly zero is neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound > 0.0 {
            SentimentLabel::Positive
        } else if compound < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label counts over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean signed confidence; `None` for an empty result set.
    pub mean_confidence: Option<f64>,
}

impl SentimentSummary {
    pub fn from_records(records: &[OutputRecord]) -> Self {
        let mut summary = Self::default();
        let mut confidence_sum = 0.0;
        for record in records {
            match record.sentiment_label {
                SentimentLabel::Positive => summary.positive += 1,
                SentimentLabel::Negative => summary.negative += 1,
                SentimentLabel::Neutral => summary.neutral += 1,
            }
            confidence_sum += record.sentiment_confidence;
        }
        if !records.is_empty() {
            summary.mean_confidence = Some(confidence_sum / records.len() as f64);
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Share of `label` in `[0, 1]`; zero for an empty result set.
    pub fn share(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(label) as f64 / total as f64
        }
    }
}
