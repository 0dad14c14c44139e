//! Run events published while a conversion progresses.
//!
//! Events are self-describing so an adapter can render them without access
//! to the pipeline's state.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::WorkSet;

/// Which synthesis round is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundPhase {
    /// The first pass over every chunk.
    Initial,
    /// Automatic retry round `attempt` (1-based).
    AutoRetry { attempt: u32 },
    /// The single operator-requested round.
    Manual,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial pass"),
            Self::AutoRetry { attempt } => write!(f, "retry {attempt}"),
            Self::Manual => write!(f, "manual retry"),
        }
    }
}

/// Canonical events for a conversion run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// The document was split and chunk texts written.
    ChunksPrepared { count: usize, work_dir: PathBuf },

    /// A synthesis round is starting.
    RoundStarted { phase: RoundPhase, targets: WorkSet },

    /// Invalid artifacts were found before automatic retry `attempt`.
    InvalidDetected { attempt: u32, invalid: WorkSet },

    /// Automatic rounds are exhausted and these chunks are still invalid.
    Unresolved { invalid: WorkSet },

    /// Manual indices outside the chunk range were discarded.
    ManualIndicesIgnored { indices: WorkSet },

    /// The operator input could not be read.
    ManualInputFailed { error: String },

    /// No manual round will run.
    ManualRoundSkipped,

    /// Final concatenation is starting.
    AssemblyStarted { segments: usize },

    /// Final file written.
    AssemblyFinished {
        output: PathBuf,
        written: usize,
        skipped: usize,
    },

    /// The working directory was deleted.
    WorkDirRemoved { path: PathBuf },
}
