//! Round state machine: initial pass, bounded automatic retries, and one
//! optional operator-directed round.
//!
//! ```text
//! Initial ──▶ AutoRetry(1) ──▶ … ──▶ AutoRetry(max) ──▶ Manual? ──▶ done
//!                 │                        │
//!                 └── nothing invalid ─────┴──────────────────────▶ done
//! ```
//!
//! The invalid set is recomputed from the working directory before every
//! automatic round. The manual round runs at most once and is not followed
//! by another validation pass.

use std::sync::Arc;

use tracing::{info, warn};

use crate::coordinator::Coordinator;
use crate::domain::WorkSet;
use crate::events::{RoundPhase, RunEvent};
use crate::ports::{ManualRetryPrompt, NoManualRetry, NoopEmitter, RunEventEmitter};
use crate::store::ChunkStore;
use crate::validator::Validator;

/// Parse a comma-separated list of chunk indices.
///
/// Tokens are trimmed; anything that is not made entirely of ASCII digits is
/// dropped silently. Duplicates collapse. Range checking is the caller's job.
pub fn parse_manual_indices(line: &str) -> WorkSet {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .collect()
}

/// What the retry rounds did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryOutcome {
    /// Automatic retry rounds that actually ran.
    pub auto_rounds_run: u32,
    /// Indices still invalid after the automatic rounds.
    pub unresolved: WorkSet,
    /// Indices sent in the manual round, if one ran.
    pub manual_round: Option<WorkSet>,
}

pub struct RetryController {
    coordinator: Coordinator,
    validator: Validator,
    max_retries: u32,
    prompt: Arc<dyn ManualRetryPrompt>,
    events: Arc<dyn RunEventEmitter>,
}

impl RetryController {
    pub fn new(coordinator: Coordinator, validator: Validator, max_retries: u32) -> Self {
        Self {
            coordinator,
            validator,
            max_retries,
            prompt: Arc::new(NoManualRetry),
            events: Arc::new(NoopEmitter::new()),
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

    /// Initial pass over every chunk, then the retry rounds.
    pub async fn run(&self, store: &ChunkStore) -> RetryOutcome {
        let all = store.indices();
        self.round(store, RoundPhase::Initial, &all).await;
        self.drive(store).await
    }

    /// Retry rounds only, for a working directory left by an earlier run.
    ///
    /// Chunks whose artifacts are already complete are never resent.
    pub async fn resume(&self, store: &ChunkStore) -> RetryOutcome {
        self.drive(store).await
    }

    async fn drive(&self, store: &ChunkStore) -> RetryOutcome {
        let mut outcome = RetryOutcome::default();

        for attempt in 1..=self.max_retries {
            let invalid = self.validator.find_invalid(store);
            if invalid.is_empty() {
                break;
            }
            info!(attempt, invalid = %invalid, "Retrying invalid chunks");
            self.events.emit(RunEvent::InvalidDetected {
                attempt,
                invalid: invalid.clone(),
            });
            self.round(store, RoundPhase::AutoRetry { attempt }, &invalid)
                .await;
            outcome.auto_rounds_run = attempt;
        }

        outcome.unresolved = self.validator.find_invalid(store);
        if outcome.unresolved.is_empty() {
            return outcome;
        }

        warn!(unresolved = %outcome.unresolved, "Chunks still invalid after automatic retries");
        self.events.emit(RunEvent::Unresolved {
            invalid: outcome.unresolved.clone(),
        });
        outcome.manual_round = self.manual_round(store, &outcome.unresolved).await;
        outcome
    }

    async fn manual_round(&self, store: &ChunkStore, unresolved: &WorkSet) -> Option<WorkSet> {
        let line = match self.prompt.request_indices(unresolved).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.events.emit(RunEvent::ManualRoundSkipped);
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Could not read manual retry input");
                self.events.emit(RunEvent::ManualInputFailed {
                    error: e.to_string(),
                });
                return None;
            }
        };

        let (targets, ignored) = parse_manual_indices(&line).split_at_bound(store.len());
        if !ignored.is_empty() {
            warn!(ignored = %ignored, chunks = store.len(), "Ignoring out-of-range indices");
            self.events
                .emit(RunEvent::ManualIndicesIgnored { indices: ignored });
        }
        if targets.is_empty() {
            self.events.emit(RunEvent::ManualRoundSkipped);
            return None;
        }

        self.round(store, RoundPhase::Manual, &targets).await;
        Some(targets)
    }

    async fn round(&self, store: &ChunkStore, phase: RoundPhase, targets: &WorkSet) {
        info!(%phase, targets = targets.len(), "Round starting");
        self.events.emit(RunEvent::RoundStarted {
            phase,
            targets: targets.clone(),
        });
        self.coordinator.run(store, targets).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockManualRetryPrompt, SynthesisError, SynthesisPort};
    use crate::split::split_text;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::Mutex;

    const BYTES_PER_WORD: u64 = 10;

    /// Writes a complete artifact unless the chunk text is in `broken`.
    struct FlakySynth {
        broken: Mutex<HashSet<String>>,
        heal_after_first: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FlakySynth {
        fn new(broken: &[&str], heal_after_first: bool) -> Self {
            Self {
                broken: Mutex::new(broken.iter().map(|s| (*s).to_string()).collect()),
                heal_after_first,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls_for(&self, text: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|t| *t == text).count()
        }
    }

    #[async_trait]
    impl SynthesisPort for FlakySynth {
        async fn synthesize(&self, text: &str, _: &str, output: &Path) -> Result<(), SynthesisError> {
            self.calls.lock().unwrap().push(text.to_string());
            let failing = {
                let mut broken = self.broken.lock().unwrap();
                let failing = broken.contains(text);
                if failing && self.heal_after_first {
                    broken.remove(text);
                }
                failing
            };
            if failing {
                return Err(SynthesisError::Request("flaky".into()));
            }
            tokio::fs::write(output, vec![0u8; 64]).await?;
            Ok(())
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn controller(synth: Arc<FlakySynth>, max_retries: u32) -> RetryController {
        RetryController::new(
            Coordinator::new(synth, "voice", 3),
            Validator::new(BYTES_PER_WORD),
            max_retries,
        )
    }

    #[test]
    fn parses_comma_separated_indices() {
        assert_eq!(parse_manual_indices("0, 5, 7").to_vec(), vec![0, 5, 7]);
        assert_eq!(parse_manual_indices("abc,,3").to_vec(), vec![3]);
        assert_eq!(parse_manual_indices(" 4 ,4,-1, 2x").to_vec(), vec![4]);
        assert!(parse_manual_indices("").is_empty());
    }

    #[tokio::test]
    async fn transient_failures_are_fixed_by_the_first_retry() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c d e f", 1)).unwrap();
        let synth = Arc::new(FlakySynth::new(&["c", "f"], true));

        let outcome = controller(synth.clone(), 3).run(&store).await;

        assert_eq!(outcome.auto_rounds_run, 1);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(outcome.manual_round, None);
        assert_eq!(synth.calls_for("c"), 2);
        assert_eq!(synth.calls_for("a"), 1);
    }

    #[tokio::test]
    async fn permanent_failure_exhausts_retries_then_asks_once() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c d", 1)).unwrap();
        let synth = Arc::new(FlakySynth::new(&["d"], false));

        let mut prompt = MockManualRetryPrompt::new();
        prompt
            .expect_request_indices()
            .withf(|unresolved| unresolved.to_vec() == vec![3])
            .times(1)
            .returning(|_| Ok(Some("3".to_string())));

        let outcome = controller(synth.clone(), 3)
            .with_prompt(Arc::new(prompt))
            .run(&store)
            .await;

        assert_eq!(outcome.auto_rounds_run, 3);
        assert_eq!(outcome.unresolved.to_vec(), vec![3]);
        assert_eq!(outcome.manual_round.map(|w| w.to_vec()), Some(vec![3]));
        // initial + 3 automatic + 1 manual
        assert_eq!(synth.calls_for("d"), 5);
    }

    #[tokio::test]
    async fn zero_retries_goes_straight_to_manual() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b", 1)).unwrap();
        let synth = Arc::new(FlakySynth::new(&["a"], false));

        let mut prompt = MockManualRetryPrompt::new();
        prompt
            .expect_request_indices()
            .times(1)
            .returning(|_| Ok(None));

        let outcome = controller(synth.clone(), 0)
            .with_prompt(Arc::new(prompt))
            .run(&store)
            .await;

        assert_eq!(outcome.auto_rounds_run, 0);
        assert_eq!(outcome.unresolved.to_vec(), vec![0]);
        assert_eq!(outcome.manual_round, None);
        assert_eq!(synth.calls_for("a"), 1);
    }

    #[tokio::test]
    async fn out_of_range_and_garbage_manual_input_is_dropped() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b", 1)).unwrap();
        let synth = Arc::new(FlakySynth::new(&["b"], false));

        let mut prompt = MockManualRetryPrompt::new();
        prompt
            .expect_request_indices()
            .returning(|_| Ok(Some("x, 99, 0".to_string())));

        let outcome = controller(synth.clone(), 1)
            .with_prompt(Arc::new(prompt))
            .run(&store)
            .await;

        assert_eq!(outcome.manual_round.map(|w| w.to_vec()), Some(vec![0]));
        assert_eq!(synth.calls_for("a"), 2);
        assert_eq!(synth.calls_for("b"), 2);
    }

    #[tokio::test]
    async fn prompt_error_skips_manual_round() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a", 1)).unwrap();
        let synth = Arc::new(FlakySynth::new(&["a"], false));

        let mut prompt = MockManualRetryPrompt::new();
        prompt.expect_request_indices().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed"))
        });

        let outcome = controller(synth.clone(), 1)
            .with_prompt(Arc::new(prompt))
            .run(&store)
            .await;

        assert_eq!(outcome.manual_round, None);
        assert_eq!(synth.calls_for("a"), 2);
    }

    #[tokio::test]
    async fn resume_only_resends_invalid_chunks() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c", 1)).unwrap();
        std::fs::write(store.artifact_path(0), vec![0u8; 64]).unwrap();
        std::fs::write(store.artifact_path(2), vec![0u8; 64]).unwrap();
        let synth = Arc::new(FlakySynth::new(&[], false));

        let outcome = controller(synth.clone(), 2).resume(&store).await;

        assert_eq!(outcome.auto_rounds_run, 1);
        assert_eq!(synth.calls_for("a"), 0);
        assert_eq!(synth.calls_for("b"), 1);
        assert_eq!(synth.calls_for("c"), 0);
    }
}
