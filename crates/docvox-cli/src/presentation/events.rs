//! Console rendering of run events.

use std::sync::Arc;

use docvox_core::{RoundPhase, RunEvent, RunEventEmitter};

use super::progress::CliProgress;

/// Prints each run event as one line, routed through the progress bar.
pub struct ConsoleEvents {
    progress: Arc<CliProgress>,
}

impl ConsoleEvents {
    pub const fn new(progress: Arc<CliProgress>) -> Self {
        Self { progress }
    }
}

/// One-line description of `event`, or `None` for events with no console
/// output.
pub fn describe(event: &RunEvent) -> Option<String> {
    let line = match event {
        RunEvent::ChunksPrepared { count, work_dir } => {
            format!("Split into {count} chunks in {}", work_dir.display())
        }
        RunEvent::RoundStarted { phase, targets } => match phase {
            RoundPhase::Initial => return None,
            _ => format!("Starting {phase} for {} chunk(s)", targets.len()),
        },
        RunEvent::InvalidDetected { attempt, invalid } => {
            format!("Retry {attempt}: {} invalid chunk(s) {invalid}", invalid.len())
        }
        RunEvent::Unresolved { invalid } => {
            format!("Still invalid after automatic retries: {invalid}")
        }
        RunEvent::ManualIndicesIgnored { indices } => {
            format!("Ignoring out-of-range indices {indices}")
        }
        RunEvent::ManualInputFailed { error } => format!("Could not read input: {error}"),
        RunEvent::ManualRoundSkipped => "No manual retry".to_string(),
        RunEvent::AssemblyStarted { segments } => format!("Assembling {segments} segments"),
        RunEvent::AssemblyFinished { .. } | RunEvent::WorkDirRemoved { .. } => return None,
    };
    Some(line)
}

impl RunEventEmitter for ConsoleEvents {
    fn emit(&self, event: RunEvent) {
        if let Some(line) = describe(&event) {
            self.progress.println(&line);
        }
    }
}
