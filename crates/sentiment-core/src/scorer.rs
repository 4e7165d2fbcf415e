//! Polarity scoring.
//!
//! [`PolarityScorer`] is the seam between the pipeline and whatever model
//! produces the scores. [`VaderScorer`] wraps the VADER lexicon model and is
//! the default; the model is built once and only read afterwards, so one
//! instance can be shared across threads and requests behind an `Arc`.

use sentiment_model::{CellValue, SentimentScore};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps one text value to a polarity score.
///
/// Implementations must be pure: the same text always yields the same
/// score and scoring never mutates shared state.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;

    /// Short model name for logs.
    fn name(&self) -> &'static str;
}

/// Scores a raw cell, coercing it to text first.
///
/// Returns the coerced text alongside the score since the output projection
/// echoes exactly what was scored.
pub fn score_cell(scorer: &dyn PolarityScorer, value: Option<&CellValue>) -> (String, SentimentScore) {
    let text = value.map(CellValue::to_text).unwrap_or_default();
    let score = if text.trim().is_empty() {
        SentimentScore::NEUTRAL
    } else {
        scorer.score(&text)
    };
    (text, score)
}

/// VADER lexicon and rule-based model.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl PolarityScorer for VaderScorer {
    fn score(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::NEUTRAL;
        }
        let scores = self.analyzer.polarity_scores(text);
        let component = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        let (positive, negative) = (component("pos"), component("neg"));
        // `!`/`?` emphasis is applied even without sentiment words, pushing
        // the compound below zero; no polar words means neutral.
        if positive == 0.0 && negative == 0.0 {
            return SentimentScore::NEUTRAL;
        }
        SentimentScore {
            compound: round_to(component("compound"), 4),
            positive: round_to(positive, 3),
            negative: round_to(negative, 3),
            neutral: round_to(component("neu"), 3),
        }
    }

    fn name(&self) -> &'static str {
        "vader"
    }
}

/// Rounds to the precision VADER reports scores with.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
