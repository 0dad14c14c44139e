//! Chunk store: the per-run working directory.
//!
//! Every chunk index owns two exclusive paths:
//!
//! - `text_{index:03}.txt` - the chunk text, written once
//! - `part_{index:03}.mp3` - the synthesized audio, overwritten per attempt
//!
//! Artifact state is read from the filesystem on every query and never
//! cached, so verdicts always reflect what is actually on disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::{AudioArtifact, TextChunk, WorkSet};

/// Errors from creating, reading, or removing a working directory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Working directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chunk indices must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("No chunk texts found in {0}")]
    Empty(PathBuf),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File name of the chunk text for `index`.
pub fn text_file_name(index: usize) -> String {
    format!("text_{index:03}.txt")
}

/// File name of the audio artifact for `index`.
pub fn artifact_file_name(index: usize) -> String {
    format!("part_{index:03}.mp3")
}

/// Chunks of one run and the directory holding their files.
#[derive(Debug)]
pub struct ChunkStore {
    work_dir: PathBuf,
    chunks: Vec<TextChunk>,
}

impl ChunkStore {
    /// Create the working directory and write one text file per chunk.
    ///
    /// An existing directory is reused; any artifacts already in it are left
    /// alone and will be judged by the validator like fresh ones.
    pub fn create(work_dir: impl Into<PathBuf>, chunks: Vec<TextChunk>) -> Result<Self, StoreError> {
        let work_dir = work_dir.into();
        for (expected, chunk) in chunks.iter().enumerate() {
            if chunk.index() != expected {
                return Err(StoreError::NonContiguous {
                    expected,
                    found: chunk.index(),
                });
            }
        }

        fs::create_dir_all(&work_dir).map_err(|e| StoreError::io(&work_dir, e))?;
        for chunk in &chunks {
            let path = work_dir.join(text_file_name(chunk.index()));
            fs::write(&path, chunk.text()).map_err(|e| StoreError::io(&path, e))?;
        }
        debug!(work_dir = %work_dir.display(), chunks = chunks.len(), "Chunk texts written");

        Ok(Self { work_dir, chunks })
    }

    /// Reload chunks from an existing working directory.
    ///
    /// Reads `text_000.txt`, `text_001.txt`, ... and stops at the first
    /// missing index.
    pub fn open(work_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let work_dir = work_dir.into();
        if !work_dir.is_dir() {
            return Err(StoreError::io(
                &work_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut chunks = Vec::new();
        loop {
            let path = work_dir.join(text_file_name(chunks.len()));
            if !path.is_file() {
                break;
            }
            let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            chunks.push(TextChunk::new(chunks.len(), text));
        }

        if chunks.is_empty() {
            return Err(StoreError::Empty(work_dir));
        }
        debug!(work_dir = %work_dir.display(), chunks = chunks.len(), "Chunk texts reloaded");

        Ok(Self { work_dir, chunks })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunk(&self, index: usize) -> Option<&TextChunk> {
        self.chunks.get(index)
    }

    /// Every chunk index, `0..len`.
    pub fn indices(&self) -> WorkSet {
        WorkSet::full(self.chunks.len())
    }

    pub fn text_path(&self, index: usize) -> PathBuf {
        self.work_dir.join(text_file_name(index))
    }

    pub fn artifact_path(&self, index: usize) -> PathBuf {
        self.work_dir.join(artifact_file_name(index))
    }

    /// The artifact currently on disk for `index`, if any.
    pub fn artifact(&self, index: usize) -> Option<AudioArtifact> {
        let path = self.artifact_path(index);
        let meta = fs::metadata(&path).ok()?;
        meta.is_file().then(|| AudioArtifact {
            index,
            path,
            byte_size: meta.len(),
        })
    }

    /// Expected artifact paths for `0..len`, in assembly order.
    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        (0..self.chunks.len())
            .map(|index| self.artifact_path(index))
            .collect()
    }

    /// Delete the working directory with everything in it.
    pub fn remove(self) -> Result<PathBuf, StoreError> {
        fs::remove_dir_all(&self.work_dir).map_err(|e| StoreError::io(&self.work_dir, e))?;
        Ok(self.work_dir)
    }
}
