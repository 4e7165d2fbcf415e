//! Tests for sentiment-model types.

use chrono::NaiveDate;
use sentiment_model::{
    DatePart, FileKind, OutputRecord, SentimentLabel, SentimentSummary, TimePart, TimestampParts,
};

#[test]
fn output_record_round_trips_through_json() {
    let dt = NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(17, 45, 9)
        .unwrap();
    let parts = TimestampParts::from(dt);
    let record = OutputRecord {
        id: 1,
        date: parts.date,
        time: parts.time,
        text: "Great service".to_string(),
        sentiment_label: SentimentLabel::Positive,
        sentiment_confidence: 0.6249,
    };

    let json = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(
        json,
        r#"{"id":1,"date":"2024-05-02","time":"17:45:09","text":"Great service","sentiment_label":"Positive","sentiment_confidence":0.6249}"#
    );
    let round: OutputRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(round, record);
}

#[test]
fn negative_confidence_keeps_sign_on_the_wire() {
    let record = OutputRecord {
        id: 2,
        date: DatePart::Unavailable,
        time: TimePart::Unavailable,
        text: "awful".to_string(),
        sentiment_label: SentimentLabel::Negative,
        sentiment_confidence: -0.4588,
    };
    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["sentiment_confidence"], -0.4588);
    assert_eq!(value["date"], "N/A");
}

#[test]
fn summary_over_mixed_labels() {
    let make = |id, label, confidence| OutputRecord {
        id,
        date: DatePart::Unavailable,
        time: TimePart::Unavailable,
        text: String::new(),
        sentiment_label: label,
        sentiment_confidence: confidence,
    };
    let records = vec![
        make(1, SentimentLabel::Negative, -0.5),
        make(2, SentimentLabel::Negative, -0.5),
        make(3, SentimentLabel::Positive, 1.0),
    ];
    let summary = SentimentSummary::from_records(&records);
    assert_eq!(summary.count(SentimentLabel::Negative), 2);
    assert_eq!(summary.count(SentimentLabel::Neutral), 0);
    assert_eq!(summary.mean_confidence, Some(0.0));
}

#[test]
fn file_kinds_are_listed_in_a_stable_order() {
    let names: Vec<&str> = FileKind::ALL.iter().map(FileKind::as_str).collect();
    assert_eq!(names, vec!["csv", "xlsx", "json", "txt"]);
}
