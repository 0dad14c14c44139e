//! Event emitter trait for run progress notifications.

use crate::events::RunEvent;

/// Trait for publishing run events.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts that don't need events
/// - The CLI's console emitter, which prints each event
pub trait RunEventEmitter: Send + Sync {
    /// Emit a run event. Must not block.
    fn emit(&self, event: RunEvent);
}

/// A no-op event emitter for tests.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl RunEventEmitter for NoopEmitter {
    fn emit(&self, _event: RunEvent) {}
}
