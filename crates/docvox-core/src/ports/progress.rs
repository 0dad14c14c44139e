//! Progress reporting for synthesis rounds.
//!
//! The coordinator reports per-chunk completion here so adapters can show a
//! progress bar without the core depending on any terminal crate.

/// Receives progress updates for one round at a time.
pub trait ProgressReporter: Send + Sync {
    /// A round is starting with `total` chunks to synthesize.
    fn start(&self, message: &str, total: u64);

    /// `delta` chunks finished (successfully or not).
    fn inc(&self, delta: u64);

    /// The round finished.
    fn finish(&self, message: &str);
}

/// A no-op progress reporter that ignores all updates.
///
/// Use this when progress reporting is not needed (e.g., in tests or
/// when running without a terminal).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _message: &str, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _message: &str) {}
}
