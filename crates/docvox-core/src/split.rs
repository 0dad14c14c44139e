//! Word-count text splitter.

use crate::domain::TextChunk;

/// Split `text` into chunks of at most `chunk_words` words.
///
/// Words are whitespace-separated tokens; each chunk joins its words with a
/// single space, so line breaks and runs of spaces are normalized. Only the
/// last chunk may be shorter than `chunk_words`. A `chunk_words` of zero is
/// treated as one.
pub fn split_text(text: &str, chunk_words: usize) -> Vec<TextChunk> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(chunk_words.max(1))
        .enumerate()
        .map(|(index, group)| TextChunk::new(index, group.join(" ")))
        .collect()
}
