//! Speech synthesis port.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single synthesis call.
///
/// The coordinator treats every variant the same way: log it and leave the
/// chunk's artifact for the validator to judge.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The backend cannot be used at all (binary missing, bad config).
    #[error("Synthesis backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the request.
    #[error("Synthesis request failed: {0}")]
    Request(String),

    /// A synthesis subprocess exited unsuccessfully.
    #[error("Synthesis process exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    /// The call exceeded the configured per-call timeout.
    #[error("Synthesis timed out after {0:?}")]
    Timeout(Duration),

    /// Writing the audio file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend-agnostic text-to-speech call producing one audio file.
///
/// Implementations must overwrite `output` rather than append to it, since
/// retries reuse the same path.
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Synthesize `text` with `voice` and write the audio to `output`.
    async fn synthesize(&self, text: &str, voice: &str, output: &Path)
    -> Result<(), SynthesisError>;

    /// Short backend name for logs.
    fn name(&self) -> &str;
}
