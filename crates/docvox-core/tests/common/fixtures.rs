//! Test adapters for the synthesis and assembler ports.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use docvox_core::{AssembleError, AssemblerPort, AssemblySummary, SynthesisError, SynthesisPort};

/// Bytes written per word for a successful call.
pub const BYTES_PER_WORD: u64 = 8;

/// Synthesizer whose failures are scripted per chunk text.
///
/// `fail_times[text] = n` makes the first `n` calls for that text fail.
/// Use `usize::MAX` for a chunk that never succeeds.
#[derive(Default)]
pub struct ScriptedSynth {
    fail_times: Mutex<HashMap<String, usize>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedSynth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, text: &str, times: usize) -> Self {
        self.fail_times
            .get_mut()
            .unwrap()
            .insert(text.to_string(), times);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls_for(&self, text: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|t| *t == text)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of calls observed in flight at once.
    pub fn peak_active(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisPort for ScriptedSynth {
    async fn synthesize(&self, text: &str, _voice: &str, output: &Path) -> Result<(), SynthesisError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let fail = {
            let mut script = self.fail_times.lock().unwrap();
            match script.get_mut(text) {
                Some(0) | None => false,
                Some(remaining) => {
                    *remaining = remaining.saturating_sub(1);
                    true
                }
            }
        };

        let result = if fail {
            Err(SynthesisError::Request(format!("scripted failure for {text:?}")))
        } else {
            let words = text.split_whitespace().count() as u64;
            let bytes = vec![0xAAu8; usize::try_from(words * BYTES_PER_WORD).unwrap()];
            tokio::fs::write(output, bytes).await.map_err(SynthesisError::from)
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Assembler that concatenates existing segments byte for byte and records
/// which ones it used.
#[derive(Default)]
pub struct RecordingAssembler {
    used: Mutex<Vec<PathBuf>>,
}

impl RecordingAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn used(&self) -> Vec<PathBuf> {
        self.used.lock().unwrap().clone()
    }

    pub fn used_names(&self) -> HashSet<String> {
        self.used()
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect()
    }
}

impl AssemblerPort for RecordingAssembler {
    fn assemble(&self, segments: &[PathBuf], output: &Path) -> Result<AssemblySummary, AssembleError> {
        let mut out = Vec::new();
        let mut summary = AssemblySummary::default();
        for segment in segments {
            match std::fs::read(segment) {
                Ok(bytes) => {
                    out.extend_from_slice(&bytes);
                    self.used.lock().unwrap().push(segment.clone());
                    summary.segments_written += 1;
                }
                Err(_) => summary.segments_skipped += 1,
            }
        }
        std::fs::write(output, out).map_err(|source| AssembleError::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;
        Ok(summary)
    }
}

/// Whitespace-separated words `w0 w1 ... w{n-1}`.
pub fn numbered_words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// Operator stand-in: answers every manual prompt with `answer`.
pub struct ScriptedPrompt {
    answer: Option<String>,
    asked_with: Mutex<Vec<docvox_core::WorkSet>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            asked_with: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: None,
            asked_with: Mutex::new(Vec::new()),
        }
    }

    pub fn asked_with(&self) -> Vec<docvox_core::WorkSet> {
        self.asked_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl docvox_core::ManualRetryPrompt for ScriptedPrompt {
    async fn request_indices(
        &self,
        unresolved: &docvox_core::WorkSet,
    ) -> std::io::Result<Option<String>> {
        self.asked_with.lock().unwrap().push(unresolved.clone());
        Ok(self.answer.clone())
    }
}

/// Emitter that keeps every event for inspection.
#[derive(Default)]
pub struct CollectingEmitter {
    events: Mutex<Vec<docvox_core::RunEvent>>,
}

impl CollectingEmitter {
    pub fn events(&self) -> Vec<docvox_core::RunEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl docvox_core::RunEventEmitter for CollectingEmitter {
    fn emit(&self, event: docvox_core::RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}
