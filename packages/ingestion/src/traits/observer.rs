//! Progress and error callbacks for one ingestion batch.

use serde::Serialize;

/// One in-flight file's progress entry.
///
/// Created when a file starts processing, mutated as it advances through
/// detection and parsing, removed on terminal success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingStatus {
    pub file_name: String,
    pub status_text: String,
    pub progress_percent: u8,
}

/// Receives per-file progress and error callbacks during a batch.
///
/// All methods default to no-ops so callers implement only what they
/// surface. Callbacks are synchronous; they are invoked from the single
/// sequential ingestion flow and must not block.
pub trait IngestObserver: Send + Sync {
    /// A file's progress entry was created or updated.
    fn status(&self, _file_name: &str, _status_text: &str, _progress_percent: u8) {}

    /// A file reached a terminal state; its progress entry goes away.
    fn remove_status(&self, _file_name: &str) {}

    /// A per-file failure. Does not abort the batch.
    fn error(&self, _message: &str, _file_name: &str) {}

    /// Every file and archive member has been processed.
    fn batch_complete(&self) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IngestObserver for NoopObserver {}
