//! Artifact completeness heuristic.
//!
//! An artifact is complete when it exists and holds at least
//! `word_count * bytes_per_word` bytes. Equality counts as complete. The
//! check is necessary but not sufficient: a large corrupted file passes.

use tracing::debug;

use crate::domain::WorkSet;
use crate::store::ChunkStore;

/// Pure verdict from a word count and the artifact's size (`None` = absent).
pub const fn is_complete(word_count: usize, byte_size: Option<u64>, bytes_per_word: u64) -> bool {
    match byte_size {
        None => false,
        Some(actual) => actual >= expected_bytes(word_count, bytes_per_word),
    }
}

const fn expected_bytes(word_count: usize, bytes_per_word: u64) -> u64 {
    (word_count as u64).saturating_mul(bytes_per_word)
}

/// Re-derives validity from the chunk store on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    bytes_per_word: u64,
}

impl Validator {
    pub const fn new(bytes_per_word: u64) -> Self {
        Self { bytes_per_word }
    }

    pub const fn bytes_per_word(&self) -> u64 {
        self.bytes_per_word
    }

    /// Whether `index` currently has a complete artifact.
    ///
    /// Indices outside the store are never valid.
    pub fn is_valid(&self, store: &ChunkStore, index: usize) -> bool {
        let Some(chunk) = store.chunk(index) else {
            return false;
        };
        let size = store.artifact(index).map(|artifact| artifact.byte_size);
        is_complete(chunk.word_count(), size, self.bytes_per_word)
    }

    /// Ascending set of indices whose artifact is absent or too small.
    pub fn find_invalid(&self, store: &ChunkStore) -> WorkSet {
        let invalid: WorkSet = store
            .chunks()
            .iter()
            .map(crate::domain::TextChunk::index)
            .filter(|&index| !self.is_valid(store, index))
            .collect();
        debug!(invalid = %invalid, "Validation pass");
        invalid
    }
}
