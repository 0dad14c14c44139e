//! `edge-tts` command-line adapter.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use docvox_core::{SynthesisError, SynthesisPort};
use tokio::process::Command;
use tracing::debug;

/// Environment variable naming an explicit `edge-tts` binary.
pub const EDGE_TTS_BIN_ENV: &str = "DOCVOX_EDGE_TTS_BIN";

const EDGE_TTS: &str = "edge-tts";

/// Longest stderr excerpt kept in an error.
const STDERR_EXCERPT: usize = 500;

/// Synthesizes speech by running `edge-tts --voice V --text=T --write-media P`.
#[derive(Debug, Clone)]
pub struct EdgeTtsClient {
    binary: PathBuf,
}

impl EdgeTtsClient {
    /// Find `edge-tts` via `DOCVOX_EDGE_TTS_BIN` or `PATH`.
    pub fn locate() -> Result<Self, SynthesisError> {
        if let Some(explicit) = std::env::var_os(EDGE_TTS_BIN_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_binary(explicit));
        }
        which::which(EDGE_TTS).map(Self::with_binary).map_err(|_| {
            SynthesisError::Unavailable(format!(
                "{EDGE_TTS} not found on PATH (pip install edge-tts, or set {EDGE_TTS_BIN_ENV})"
            ))
        })
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl SynthesisPort for EdgeTtsClient {
    async fn synthesize(&self, text: &str, voice: &str, output: &Path) -> Result<(), SynthesisError> {
        debug!(voice, output = %output.display(), chars = text.len(), "Running edge-tts");

        // `--text=` keeps text that starts with '-' from being read as a flag
        let result = Command::new(&self.binary)
            .arg("--voice")
            .arg(voice)
            .arg(format!("--text={text}"))
            .arg("--write-media")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                SynthesisError::Unavailable(format!("failed to run {}: {e}", self.binary.display()))
            })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        Err(SynthesisError::ProcessFailed {
            status: result.status.to_string(),
            stderr: excerpt(stderr.trim(), STDERR_EXCERPT),
        })
    }

    fn name(&self) -> &str {
        EDGE_TTS
    }
}

/// Keep at most the last `max` bytes of `text`, on a char boundary.
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("…{}", &text[start..])
}
