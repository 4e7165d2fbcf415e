//! Upload processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Received**: the fully buffered upload and its declared filename
//! 2. **Parsed**: format detected by extension and decoded into a record set
//! 3. **Validated**: the `text` column is present in every record
//! 4. **Scored**: every `text` value scored in row order
//! 5. **Assembled**: labels, confidence, timestamps and ids projected
//! 6. **Done**
//!
//! Any stage may fail instead, producing one [`PipelineError`] that names the
//! last stage reached. Output is all-or-nothing.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use sentiment_model::{CellValue, OutputRecord, RecordSet, TEXT_COLUMN};
use tracing::{debug, info, info_span, warn};

use crate::assemble::{AssembleOptions, RecordAssembler};
use crate::error::{PipelineError, PipelineErrorKind, PipelineStage, Result};
use crate::redact::redact_value;
use crate::scorer::{PolarityScorer, VaderScorer};

/// Default number of rows echoed to the debug log after parsing and assembly.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Options for a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub assemble: AssembleOptions,
    /// Rows shown in debug-level previews.
    pub preview_rows: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            assemble: AssembleOptions::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_assemble(mut self, assemble: AssembleOptions) -> Self {
        self.assemble = assemble;
        self
    }
}

/// Runs uploads through parse, validate, score and assemble.
///
/// The scorer is shared read-only, so one pipeline can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Pipeline {
    assembler: RecordAssembler,
    preview_rows: usize,
}

impl Pipeline {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self::with_options(scorer, PipelineOptions::default())
    }

    pub fn with_options(scorer: Arc<dyn PolarityScorer>, options: PipelineOptions) -> Self {
        Self {
            assembler: RecordAssembler::new(scorer).with_options(options.assemble),
            preview_rows: options.preview_rows,
        }
    }

    /// Pipeline backed by the VADER model.
    pub fn with_default_model() -> Self {
        Self::new(Arc::new(VaderScorer::new()))
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Processes one upload. See [`Pipeline::run`].
    pub fn process_upload(&self, content: &[u8], filename: &str) -> Result<Vec<OutputRecord>> {
        self.run(content, filename)
    }

    /// Drives one upload through every stage.
    pub fn run(&self, content: &[u8], filename: &str) -> Result<Vec<OutputRecord>> {
        let span = info_span!(
            "upload",
            filename = %filename,
            bytes = content.len(),
            scorer = self.assembler.scorer().name()
        );
        let _guard = span.enter();
        let start = Instant::now();
        let mut stage = PipelineStage::Received;
        info!("received upload");

        // ====================================================================
        // Stage: Parse
        // ====================================================================
        let set = parse_stage(stage, || sentiment_ingest::parse(content, filename))?;
        stage = advance(stage, PipelineStage::Parsed);
        self.preview_input(&set);

        // ====================================================================
        // Stage: Validate
        // ====================================================================
        contain_panic(stage, || self.assembler.validate(&set))?
            .map_err(|error| fail(PipelineError::from_assemble(&error, stage)))?;
        stage = advance(stage, PipelineStage::Validated);

        // ====================================================================
        // Stage: Score
        // ====================================================================
        let scored = info_span!("score").in_scope(|| {
            let stage_start = Instant::now();
            let scored = contain_panic(stage, || self.assembler.score(&set))?;
            debug!(
                rows = scored.len(),
                elapsed_ms = stage_start.elapsed().as_millis(),
                "score complete"
            );
            Ok::<_, PipelineError>(scored)
        })?;
        stage = advance(stage, PipelineStage::Scored);

        // ====================================================================
        // Stage: Assemble
        // ====================================================================
        let records = info_span!("assemble")
            .in_scope(|| contain_panic(stage, || self.assembler.project(&set, scored)))?;
        stage = advance(stage, PipelineStage::Assembled);
        self.preview_output(&records);

        advance(stage, PipelineStage::Done);
        info!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "upload processed"
        );
        Ok(records)
    }

    fn preview_input(&self, set: &RecordSet) {
        for (idx, record) in set.records.iter().take(self.preview_rows).enumerate() {
            let text = record
                .get(TEXT_COLUMN)
                .map(CellValue::to_text)
                .unwrap_or_default();
            debug!(row = idx + 1, text = %redact_value(&text), "input preview");
        }
    }

    fn preview_output(&self, records: &[OutputRecord]) {
        for record in records.iter().take(self.preview_rows) {
            debug!(
                id = record.id,
                date = %record.date,
                time = %record.time,
                label = %record.sentiment_label,
                confidence = record.sentiment_confidence,
                text = %redact_value(&record.text),
                "result preview"
            );
        }
    }
}

/// Processes an upload with the process-wide default pipeline.
///
/// The VADER model is loaded on first use and reused for every later call.
pub fn process_upload(content: &[u8], filename: &str) -> Result<Vec<OutputRecord>> {
    static SHARED: OnceLock<Pipeline> = OnceLock::new();
    SHARED
        .get_or_init(Pipeline::with_default_model)
        .run(content, filename)
}

/// Decodes the upload; reader failures and reader panics both stop here.
fn parse_stage<F>(stage: PipelineStage, parse: F) -> Result<RecordSet>
where
    F: FnOnce() -> sentiment_ingest::Result<RecordSet>,
{
    info_span!("parse").in_scope(|| {
        let stage_start = Instant::now();
        let parsed = contain_panic(stage, parse)?
            .map_err(|error| fail(PipelineError::from_ingest(&error, stage)))?;
        debug!(
            kind = %parsed.kind,
            rows = parsed.len(),
            columns = ?parsed.columns,
            elapsed_ms = stage_start.elapsed().as_millis(),
            "parse complete"
        );
        Ok(parsed)
    })
}

fn advance(from: PipelineStage, to: PipelineStage) -> PipelineStage {
    debug!(from = %from, to = %to, "stage transition");
    to
}

fn fail(error: PipelineError) -> PipelineError {
    warn!(
        kind = %error.kind,
        stage = %error.stage,
        detail = %error.detail,
        "upload failed"
    );
    error
}

/// Runs `work`, turning a panic into an `Internal` failure at `stage`.
fn contain_panic<T>(stage: PipelineStage, work: impl FnOnce() -> T) -> Result<T> {
    catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
        fail(PipelineError::new(
            PipelineErrorKind::Internal,
            stage,
            panic_message(payload.as_ref()),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal fault without message".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_messages_are_extracted() {
        let err = contain_panic(PipelineStage::Validated, || -> u8 { panic!("boom {}", 1) })
            .unwrap_err();
        assert_eq!(err.kind, PipelineErrorKind::Internal);
        assert_eq!(err.stage, PipelineStage::Validated);
        assert_eq!(err.detail, "boom 1");

        let err = contain_panic(PipelineStage::Scored, || -> u8 { panic!("static") }).unwrap_err();
        assert_eq!(err.detail, "static");
    }

    #[test]
    fn reader_panic_is_internal_at_received() {
        let err = parse_stage(PipelineStage::Received, || -> sentiment_ingest::Result<RecordSet> {
            panic!("zip entry overflow")
        })
        .unwrap_err();
        assert_eq!(err.kind, PipelineErrorKind::Internal);
        assert_eq!(err.stage, PipelineStage::Received);
        assert_eq!(err.detail, "zip entry overflow");
    }

    #[test]
    fn reader_errors_keep_their_kind() {
        let err = parse_stage(PipelineStage::Received, || {
            sentiment_ingest::parse(b"[1,", "rows.json")
        })
        .unwrap_err();
        assert_eq!(err.kind, PipelineErrorKind::MalformedInput);
        assert_eq!(err.stage, PipelineStage::Received);
    }

    #[test]
    fn work_result_passes_through() {
        assert_eq!(contain_panic(PipelineStage::Parsed, || 7).unwrap(), 7);
    }

    #[test]
    fn shared_pipeline_handles_uploads() {
        let out = process_upload(b"text\nI love this\n", "one.csv").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }
}
