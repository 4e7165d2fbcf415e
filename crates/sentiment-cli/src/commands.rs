use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use sentiment_core::{AssembleOptions, Pipeline, PipelineOptions, VaderScorer};
use sentiment_model::{OutputRecord, SentimentSummary};

use crate::cli::{AnalyzeArgs, OutputFormatArg};
use crate::summary::{formats_table, results_table, summary_table};

/// Outcome of one `analyze` run.
#[derive(Debug)]
pub struct AnalyzeResult {
    /// Filename the pipeline saw (drives format detection).
    pub name: String,
    pub records: Vec<OutputRecord>,
    pub summary: SentimentSummary,
    /// Rendered results, already written when `output` is set.
    pub rendered: String,
    pub output: Option<PathBuf>,
}

pub fn run_formats() -> Result<()> {
    println!("{}", formats_table());
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let name = declared_name(args)?;
    let span = info_span!("analyze", file = %args.file.display(), name = %name);
    let _guard = span.enter();
    let start = Instant::now();

    let content =
        std::fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;

    let assemble = AssembleOptions::default().with_source_ids(!args.row_ids);
    let pipeline = Pipeline::with_options(
        Arc::new(VaderScorer::new()),
        PipelineOptions::default().with_assemble(assemble),
    );
    let records = pipeline.run(&content, &name)?;
    let summary = SentimentSummary::from_records(&records);

    let rendered = render_records(&records, args.format)?;
    if let Some(path) = &args.output {
        std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("write {}", path.display()))?;
    }

    info!(
        records = records.len(),
        positive = summary.positive,
        negative = summary.negative,
        neutral = summary.neutral,
        elapsed_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(AnalyzeResult {
        name,
        records,
        summary,
        rendered,
        output: args.output.clone(),
    })
}

/// Prints results (unless written to a file) and the optional summary table.
pub fn print_analysis(result: &AnalyzeResult, with_summary: bool) {
    match &result.output {
        Some(path) => println!(
            "Wrote {} records to {}",
            result.records.len(),
            path.display()
        ),
        None => println!("{}", result.rendered),
    }
    if with_summary {
        println!();
        println!("Summary:");
        println!("{}", summary_table(&result.summary));
    }
}

pub fn render_records(records: &[OutputRecord], format: OutputFormatArg) -> Result<String> {
    let rendered = match format {
        OutputFormatArg::Json => serde_json::to_string(records).context("serialize results")?,
        OutputFormatArg::PrettyJson => {
            serde_json::to_string_pretty(records).context("serialize results")?
        }
        OutputFormatArg::Table => results_table(records).to_string(),
    };
    Ok(rendered)
}

fn declared_name(args: &AnalyzeArgs) -> Result<String> {
    if let Some(name) = &args.name {
        return Ok(name.clone());
    }
    file_name(&args.file)
        .ok_or_else(|| anyhow!("cannot derive a filename from {}", args.file.display()))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
