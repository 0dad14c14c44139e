//! Bounded-concurrency synthesis rounds.
//!
//! # Concurrency Model
//!
//! - One tokio task per targeted index, collected in a `JoinSet`
//! - A counting `Semaphore` is the admission gate: at most
//!   `max_concurrency` tasks are inside a synthesis call at once
//! - The permit is an owned guard, so it is released on every exit path
//!   (success, error, timeout, panic)
//! - Each index writes only its own `part_NNN.mp3`, so tasks share no files
//!
//! A round reports nothing back. Failures are logged and left for the
//! validator to find on the next pass.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::WorkSet;
use crate::ports::{NoopProgress, ProgressReporter, SynthesisError, SynthesisPort};
use crate::store::ChunkStore;

/// Everything one task needs, owned so it can move into the task.
struct SynthesisJob {
    index: usize,
    text: String,
    output: PathBuf,
}

/// Runs the synthesis client over index sets with a hard concurrency ceiling.
#[derive(Clone)]
pub struct Coordinator {
    synthesizer: Arc<dyn SynthesisPort>,
    voice: Arc<str>,
    max_concurrency: usize,
    timeout: Option<Duration>,
    progress: Arc<dyn ProgressReporter>,
}

impl Coordinator {
    /// Create a coordinator. A ceiling of zero is raised to one.
    pub fn new(
        synthesizer: Arc<dyn SynthesisPort>,
        voice: impl Into<Arc<str>>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            synthesizer,
            voice: voice.into(),
            max_concurrency: max_concurrency.max(1),
            timeout: None,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Fail any single call that runs longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Report per-chunk completion to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Synthesize every index in `work_set` and wait for all of them.
    ///
    /// Completion order is unspecified. Indices with no chunk in `store` are
    /// skipped with a warning.
    pub async fn run(&self, store: &ChunkStore, work_set: &WorkSet) {
        let gate = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        self.progress
            .start("Synthesizing", u64::try_from(work_set.len()).unwrap_or(u64::MAX));
        info!(
            targets = work_set.len(),
            max_concurrency = self.max_concurrency,
            backend = self.synthesizer.name(),
            "Starting synthesis round"
        );

        for index in work_set {
            let Some(chunk) = store.chunk(index) else {
                warn!(index, chunks = store.len(), "Skipping index outside the chunk range");
                continue;
            };
            let job = SynthesisJob {
                index,
                text: chunk.text().to_owned(),
                output: store.artifact_path(index),
            };

            let gate = Arc::clone(&gate);
            let synthesizer = Arc::clone(&self.synthesizer);
            let voice = Arc::clone(&self.voice);
            let progress = Arc::clone(&self.progress);
            let timeout = self.timeout;

            tasks.spawn(async move {
                // Held until the task ends, whatever the outcome
                let Ok(_permit) = gate.acquire_owned().await else {
                    warn!(index = job.index, "Admission gate closed; chunk not attempted");
                    return;
                };

                match synthesize_one(synthesizer.as_ref(), &job, &voice, timeout).await {
                    Ok(()) => debug!(index = job.index, "Chunk synthesized"),
                    Err(e) => warn!(index = job.index, error = %e, "Chunk synthesis failed"),
                }
                progress.inc(1);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Synthesis task aborted");
                self.progress.inc(1);
            }
        }

        self.progress.finish("Round complete");
    }
}

async fn synthesize_one(
    synthesizer: &dyn SynthesisPort,
    job: &SynthesisJob,
    voice: &str,
    timeout: Option<Duration>,
) -> Result<(), SynthesisError> {
    let call = synthesizer.synthesize(&job.text, voice, &job.output);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| SynthesisError::Timeout(limit))?,
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::split_text;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records which indices were requested, fails on a fixed set.
    struct RecordingSynth {
        fail_on: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SynthesisPort for RecordingSynth {
        async fn synthesize(
            &self,
            text: &str,
            _voice: &str,
            output: &Path,
        ) -> Result<(), SynthesisError> {
            self.calls.lock().unwrap().push(text.to_string());
            if self.fail_on.iter().any(|t| t == text) {
                return Err(SynthesisError::Request("boom".into()));
            }
            tokio::fs::write(output, text.as_bytes()).await?;
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct HangingSynth;

    #[async_trait]
    impl SynthesisPort for HangingSynth {
        async fn synthesize(&self, _: &str, _: &str, _: &Path) -> Result<(), SynthesisError> {
            std::future::pending::<()>().await;
            Ok(())
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    #[tokio::test]
    async fn failure_does_not_stop_siblings() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c d", 1)).unwrap();
        let synth = Arc::new(RecordingSynth {
            fail_on: vec!["b".into()],
            calls: Mutex::new(Vec::new()),
        });

        let coordinator = Coordinator::new(synth.clone(), "voice", 2);
        coordinator.run(&store, &store.indices()).await;

        let mut calls = synth.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["a", "b", "c", "d"]);
        assert!(store.artifact(0).is_some());
        assert!(store.artifact(1).is_none());
        assert!(store.artifact(3).is_some());
    }

    #[tokio::test]
    async fn only_targets_the_work_set() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c d", 1)).unwrap();
        let synth = Arc::new(RecordingSynth {
            fail_on: Vec::new(),
            calls: Mutex::new(Vec::new()),
        });

        let work_set: WorkSet = [1, 3, 17].into_iter().collect();
        Coordinator::new(synth.clone(), "voice", 4)
            .run(&store, &work_set)
            .await;

        let mut calls = synth.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["b", "d"]);
    }

    #[tokio::test]
    async fn repeated_run_gives_the_same_verdicts() {
        let root = tempfile::tempdir().unwrap();
        let store =
            ChunkStore::create(root.path().join("w"), split_text("a b c d e", 1)).unwrap();
        let synth = Arc::new(RecordingSynth {
            fail_on: vec!["b".into(), "e".into()],
            calls: Mutex::new(Vec::new()),
        });
        let coordinator = Coordinator::new(synth.clone(), "voice", 3);
        let validator = crate::validator::Validator::new(1);
        let all = store.indices();

        coordinator.run(&store, &all).await;
        let first = validator.find_invalid(&store);
        let first_bytes: Vec<_> = store
            .artifact_paths()
            .iter()
            .map(|p| std::fs::read(p).ok())
            .collect();

        coordinator.run(&store, &all).await;
        let second = validator.find_invalid(&store);
        let second_bytes: Vec<_> = store
            .artifact_paths()
            .iter()
            .map(|p| std::fs::read(p).ok())
            .collect();

        assert_eq!(first.to_vec(), vec![1, 4]);
        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
        assert_eq!(synth.calls.lock().unwrap().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_releases_the_slot() {
        let root = tempfile::tempdir().unwrap();
        let store = ChunkStore::create(root.path().join("w"), split_text("a b c", 1)).unwrap();

        // One slot, three hanging calls: only returns if each timeout frees the slot
        Coordinator::new(Arc::new(HangingSynth), "voice", 1)
            .with_timeout(Some(Duration::from_secs(5)))
            .run(&store, &store.indices())
            .await;

        assert!(store.artifact(0).is_none());
    }

    #[test]
    fn zero_ceiling_is_raised_to_one() {
        let coordinator = Coordinator::new(Arc::new(HangingSynth), "voice", 0);
        assert_eq!(coordinator.max_concurrency(), 1);
    }
}
