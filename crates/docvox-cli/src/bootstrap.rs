//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired together for the
//! CLI. All concrete implementations are instantiated here:
//! - Document reader (via docvox-document)
//! - Synthesis backend (via docvox-tts)
//! - MP3 assembler (via docvox-audio)
//! - Progress bar, event printer and manual prompt (CLI-local)
//!
//! Command handlers receive the composed context and delegate to the
//! pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docvox_audio::Mp3Assembler;
use docvox_core::{
    ConversionPipeline, DocumentReaderPort, ManualRetryPrompt, NoManualRetry, PipelineConfig,
    Settings, default_output_dir, settings_file_path, validate_settings,
};
use docvox_document::DefaultDocumentReader;
use docvox_tts::build_synthesizer;
use tracing::debug;

use crate::commands::RunOptions;
use crate::error::CliError;
use crate::presentation::{CliProgress, ConsoleEvents};
use crate::utils::ConsoleRetryPrompt;

/// Fallback variable for the API key, as used by OpenAI's own tools.
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Build effective settings: defaults, then the settings file, then
/// environment and flags (already combined by clap in `options`).
///
/// An explicit `config` path must exist; the default location is optional.
pub fn load_settings(config: Option<&Path>, options: &RunOptions) -> Result<Settings, CliError> {
    let mut settings = Settings::with_defaults();

    let file = match config {
        Some(path) => Some(path.to_path_buf()),
        None => settings_file_path().ok().filter(|path| path.is_file()),
    };
    if let Some(path) = file {
        debug!(path = %path.display(), "Loading settings file");
        settings.overlay(&Settings::load_file(&path)?);
    }

    settings.merge(&options.to_update());

    if settings.openai_api_key.is_none() {
        settings.openai_api_key = std::env::var(OPENAI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    validate_settings(&settings)?;
    Ok(settings)
}

/// Directory receiving working directories and final files.
pub fn output_dir(settings: &Settings) -> PathBuf {
    settings
        .output_dir
        .as_deref()
        .map_or_else(default_output_dir, PathBuf::from)
}

/// Fully composed context for the convert and resume commands.
pub struct CliContext {
    pub settings: Settings,
    pub output_dir: PathBuf,
    pub reader: Arc<dyn DocumentReaderPort>,
    pub pipeline: ConversionPipeline,
}

/// Wire the adapters for one run.
///
/// With `interactive` false the manual retry round is never offered.
pub fn bootstrap(settings: Settings, interactive: bool) -> Result<CliContext, CliError> {
    let output_dir = output_dir(&settings);
    let synthesizer =
        build_synthesizer(&settings).map_err(|e| CliError::Config(e.to_string()))?;

    let progress = Arc::new(CliProgress::new());
    let events = Arc::new(ConsoleEvents::new(Arc::clone(&progress)));
    let prompt: Arc<dyn ManualRetryPrompt> = if interactive {
        Arc::new(ConsoleRetryPrompt)
    } else {
        Arc::new(NoManualRetry)
    };

    let pipeline = ConversionPipeline::new(
        PipelineConfig::from_settings(&settings),
        synthesizer,
        Arc::new(Mp3Assembler::new()),
    )
    .with_prompt(prompt)
    .with_events(events)
    .with_progress(progress);

    Ok(CliContext {
        settings,
        output_dir,
        reader: Arc::new(DefaultDocumentReader::new()),
        pipeline,
    })
}
