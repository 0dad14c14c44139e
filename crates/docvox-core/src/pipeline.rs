//! End-to-end conversion: split, synthesize, retry, assemble, clean up.
//!
//! The pipeline owns no adapters; it is wired with ports by the caller's
//! composition root.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::coordinator::Coordinator;
use crate::domain::WorkSet;
use crate::error::CoreError;
use crate::events::RunEvent;
use crate::paths::RunLayout;
use crate::ports::{
    AssemblerPort, ManualRetryPrompt, NoManualRetry, NoopEmitter, NoopProgress, ProgressReporter,
    RunEventEmitter, SynthesisPort,
};
use crate::retry::{RetryController, RetryOutcome};
use crate::settings::Settings;
use crate::split::split_text;
use crate::store::ChunkStore;
use crate::validator::Validator;

/// Resolved tuning knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub chunk_words: usize,
    pub max_concurrency: usize,
    pub max_retries: u32,
    pub bytes_per_word: u64,
    pub voice: String,
    pub synthesis_timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Take the effective value of every setting.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            chunk_words: settings.effective_chunk_words(),
            max_concurrency: settings.effective_max_concurrency(),
            max_retries: settings.effective_max_retries(),
            bytes_per_word: settings.effective_bytes_per_word(),
            voice: settings.effective_voice().to_string(),
            synthesis_timeout: settings.synthesis_timeout(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::with_defaults())
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub chunk_count: usize,
    pub auto_rounds_run: u32,
    /// Indices still invalid when automatic retries ran out.
    pub unresolved: WorkSet,
    /// Indices resent in the manual round, if it ran.
    pub manual_round: Option<WorkSet>,
    pub segments_assembled: usize,
    /// Chunks left out of the final file.
    pub segments_skipped: usize,
    pub output_path: PathBuf,
    pub work_dir_removed: bool,
}

pub struct ConversionPipeline {
    config: PipelineConfig,
    synthesizer: Arc<dyn SynthesisPort>,
    assembler: Arc<dyn AssemblerPort>,
    prompt: Arc<dyn ManualRetryPrompt>,
    events: Arc<dyn RunEventEmitter>,
    progress: Arc<dyn ProgressReporter>,
}

impl ConversionPipeline {
    pub fn new(
        config: PipelineConfig,
        synthesizer: Arc<dyn SynthesisPort>,
        assembler: Arc<dyn AssemblerPort>,
    ) -> Self {
        Self {
            config,
            synthesizer,
            assembler,
            prompt: Arc::new(NoManualRetry),
            events: Arc::new(NoopEmitter::new()),
            progress: Arc::new(NoopProgress),
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: Arc<dyn ManualRetryPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn RunEventEmitter>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert already-extracted `text` into `layout.output`.
    ///
    /// Text files for every chunk are written before any synthesis starts.
    /// Per-chunk failures never abort the run; the final file simply omits
    /// chunks that never produced a valid artifact.
    ///
    /// Text with no words is invalid input, like an unreadable document: it
    /// fails with [`CoreError::EmptyDocument`] before the working directory
    /// is created, and no empty output file is written.
    pub async fn convert(
        &self,
        text: &str,
        layout: &RunLayout,
    ) -> Result<ConversionSummary, CoreError> {
        let chunks = split_text(text, self.config.chunk_words);
        if chunks.is_empty() {
            return Err(CoreError::EmptyDocument);
        }

        let store = ChunkStore::create(&layout.work_dir, chunks)?;
        info!(
            chunks = store.len(),
            work_dir = %store.work_dir().display(),
            "Chunk texts written"
        );
        self.events.emit(RunEvent::ChunksPrepared {
            count: store.len(),
            work_dir: store.work_dir().to_path_buf(),
        });

        let outcome = self.controller().run(&store).await;
        self.finish(store, outcome, layout).await
    }

    /// Pick up a working directory left by an interrupted run.
    ///
    /// Chunk texts are reloaded from disk and only invalid artifacts are
    /// resynthesized before assembly.
    pub async fn resume(&self, layout: &RunLayout) -> Result<ConversionSummary, CoreError> {
        let store = ChunkStore::open(&layout.work_dir)?;
        info!(
            chunks = store.len(),
            work_dir = %store.work_dir().display(),
            "Resuming from working directory"
        );
        self.events.emit(RunEvent::ChunksPrepared {
            count: store.len(),
            work_dir: store.work_dir().to_path_buf(),
        });

        let outcome = self.controller().resume(&store).await;
        self.finish(store, outcome, layout).await
    }

    fn controller(&self) -> RetryController {
        let coordinator = Coordinator::new(
            Arc::clone(&self.synthesizer),
            self.config.voice.as_str(),
            self.config.max_concurrency,
        )
        .with_timeout(self.config.synthesis_timeout)
        .with_progress(Arc::clone(&self.progress));

        RetryController::new(
            coordinator,
            Validator::new(self.config.bytes_per_word),
            self.config.max_retries,
        )
        .with_prompt(Arc::clone(&self.prompt))
        .with_events(Arc::clone(&self.events))
    }

    /// Assemble whatever exists, then delete the working directory.
    ///
    /// If assembly fails the working directory is left in place so the run
    /// can be resumed.
    async fn finish(
        &self,
        store: ChunkStore,
        outcome: RetryOutcome,
        layout: &RunLayout,
    ) -> Result<ConversionSummary, CoreError> {
        let segments = store.artifact_paths();
        self.events.emit(RunEvent::AssemblyStarted {
            segments: segments.len(),
        });

        let assembler = Arc::clone(&self.assembler);
        let output = layout.output.clone();
        let assembly = tokio::task::spawn_blocking(move || assembler.assemble(&segments, &output))
            .await
            .map_err(|e| CoreError::Internal(format!("Assembly task failed: {e}")))??;

        info!(
            output = %layout.output.display(),
            written = assembly.segments_written,
            skipped = assembly.segments_skipped,
            "Final audio written"
        );
        self.events.emit(RunEvent::AssemblyFinished {
            output: layout.output.clone(),
            written: assembly.segments_written,
            skipped: assembly.segments_skipped,
        });

        let chunk_count = store.len();
        let work_dir_removed = match store.remove() {
            Ok(path) => {
                self.events.emit(RunEvent::WorkDirRemoved { path });
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not remove working directory");
                false
            }
        };

        Ok(ConversionSummary {
            chunk_count,
            auto_rounds_run: outcome.auto_rounds_run,
            unresolved: outcome.unresolved,
            manual_round: outcome.manual_round,
            segments_assembled: assembly.segments_written,
            segments_skipped: assembly.segments_skipped,
            output_path: layout.output.clone(),
            work_dir_removed,
        })
    }
}
