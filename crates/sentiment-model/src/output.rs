use serde::{Deserialize, Serialize};

use crate::{DatePart, SentimentLabel, TimePart};

/// One scored row in the fixed output projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// 1-based row position unless the source supplied an `id` column.
    pub id: u64,
    pub date: DatePart,
    pub time: TimePart,
    pub text: String,
    pub sentiment_label: SentimentLabel,
    /// Signed compound score; negative for negative sentiment.
    pub sentiment_confidence: f64,
}
