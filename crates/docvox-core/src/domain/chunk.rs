//! Text chunks and the audio artifacts synthesized from them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A contiguous, word-bounded slice of the source document.
///
/// Chunks are produced once by the splitter and never mutated. The index
/// defines the canonical assembly order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    index: usize,
    text: String,
    word_count: usize,
}

impl TextChunk {
    /// Create a chunk, counting whitespace-separated words in `text`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            index,
            text,
            word_count,
        }
    }

    /// Position of this chunk in the document (0-based).
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The chunk text as sent to the synthesis backend.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-separated words in the chunk.
    pub const fn word_count(&self) -> usize {
        self.word_count
    }
}

/// An audio file found on disk for a chunk index.
///
/// Its presence says nothing about completeness; the validator decides that
/// from `byte_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioArtifact {
    /// Chunk index this artifact belongs to.
    pub index: usize,
    /// Location inside the run's working directory.
    pub path: PathBuf,
    /// Size on disk at the time it was observed.
    pub byte_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_repeated_whitespace() {
        let chunk = TextChunk::new(4, "  one\ttwo \n three  ");
        assert_eq!(chunk.index(), 4);
        assert_eq!(chunk.word_count(), 3);
    }

    #[test]
    fn empty_text_has_zero_words() {
        assert_eq!(TextChunk::new(0, "").word_count(), 0);
    }
}
