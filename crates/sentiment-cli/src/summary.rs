use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use sentiment_model::{FileKind, OutputRecord, SentimentLabel, SentimentSummary};

/// One row per scored record: ID, date, time, text, label and confidence.
pub fn results_table(records: &[OutputRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Date"),
        header_cell("Time"),
        header_cell("Text"),
        header_cell("Sentiment"),
        header_cell("Confidence"),
    ]);
    apply_results_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.id),
            part_cell(&record.date.to_string()),
            part_cell(&record.time.to_string()),
            Cell::new(&record.text),
            label_cell(record.sentiment_label),
            Cell::new(format!("{:.4}", record.sentiment_confidence))
                .fg(label_color(record.sentiment_label)),
        ]);
    }
    table
}

/// Counts and shares per label, plus the mean signed confidence.
pub fn summary_table(summary: &SentimentSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sentiment"),
        header_cell("Records"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        let count = summary.count(label);
        table.add_row(vec![
            label_cell(label),
            count_cell(count, label_color(label)),
            Cell::new(format!("{:.1}%", summary.share(label) * 100.0)),
        ]);
    }
    let mean = match summary.mean_confidence {
        Some(mean) => Cell::new(format!("mean confidence {mean:.4}")),
        None => dim_cell("-"),
    };
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total()).add_attribute(Attribute::Bold),
        mean,
    ]);
    table
}

/// Supported upload formats.
pub fn formats_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Extension"), header_cell("Description")]);
    apply_table_style(&mut table);
    for kind in FileKind::ALL {
        table.add_row(vec![
            Cell::new(format!(".{}", kind.as_str()))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(kind.description()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_results_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Yellow,
    }
}

fn label_cell(label: SentimentLabel) -> Cell {
    Cell::new(label.as_str())
        .fg(label_color(label))
        .add_attribute(Attribute::Bold)
}

fn part_cell(value: &str) -> Cell {
    if value == sentiment_model::UNAVAILABLE {
        dim_cell(value)
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_model::{DatePart, TimePart};

    fn record(id: u64, text: &str, confidence: f64) -> OutputRecord {
        OutputRecord {
            id,
            date: DatePart::Unavailable,
            time: TimePart::Unavailable,
            text: text.to_string(),
            sentiment_label: SentimentLabel::from_compound(confidence),
            sentiment_confidence: confidence,
        }
    }

    #[test]
    fn results_table_has_a_row_per_record() {
        let records = vec![record(1, "I love this", 0.6369), record(2, "meh", 0.0)];
        let table = results_table(&records);
        assert_eq!(table.row_count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("I love this"));
        assert!(rendered.contains("0.6369"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn summary_table_lists_each_label_and_total() {
        let records = vec![record(1, "a", 0.5), record(2, "b", -0.5), record(3, "c", 0.5)];
        let table = summary_table(&SentimentSummary::from_records(&records));
        assert_eq!(table.row_count(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("Positive"));
        assert!(rendered.contains("66.7%"));
        assert!(rendered.contains("TOTAL"));
    }

    #[test]
    fn formats_table_lists_all_kinds() {
        let rendered = formats_table().to_string();
        for ext in [".csv", ".xlsx", ".json", ".txt"] {
            assert!(rendered.contains(ext), "missing {ext}");
        }
    }
}
