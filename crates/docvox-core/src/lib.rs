#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod coordinator;
pub mod domain;
pub mod error;
pub mod events;
pub mod paths;
pub mod pipeline;
pub mod ports;
pub mod retry;
pub mod settings;
pub mod split;
pub mod store;
pub mod validator;

// Re-export commonly used types for convenience
pub use coordinator::Coordinator;
pub use domain::{AudioArtifact, DocumentFormat, TextChunk, WorkSet};
pub use error::CoreError;
pub use events::{RoundPhase, RunEvent};
pub use pipeline::{ConversionPipeline, ConversionSummary, PipelineConfig};
pub use ports::{
    AssembleError, AssemblerPort, AssemblySummary, DocumentReaderPort, ExtractError,
    ManualRetryPrompt, NoManualRetry, NoopEmitter, NoopProgress, ProgressReporter,
    RunEventEmitter, SynthesisError, SynthesisPort,
};
pub use retry::{RetryController, RetryOutcome, parse_manual_indices};
pub use settings::{
    DEFAULT_BYTES_PER_WORD, DEFAULT_CHUNK_WORDS, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RETRIES,
    DEFAULT_VOICE, Settings, SettingsError, SettingsUpdate, SynthesisBackend, validate_settings,
};
pub use split::split_text;
pub use store::{ChunkStore, StoreError, artifact_file_name, text_file_name};
pub use validator::{Validator, is_complete};

// Re-export path utilities
pub use paths::{
    PathError, RunLayout, data_root, default_output_dir, ensure_output_dir, require_output_dir,
    settings_file_path,
};

// Silence unused dev-dependency warnings for the async test helpers
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;
