//! Testing utilities: a recording sink and observer.
//!
//! These let applications exercise ingestion logic without wiring a real
//! presentation layer.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::detect::FormatTag;
use crate::error::{IngestError, Result};
use crate::traits::observer::{IngestObserver, ProcessingStatus};
use crate::traits::sink::ResultSink;
use crate::types::record_set::RecordSet;

/// One recorded delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub records: RecordSet,
    pub format: FormatTag,
    pub display_name: String,
}

/// A sink that records every delivery for assertions.
///
/// Clones share the same recorded state.
#[derive(Default)]
pub struct MockSink {
    deliveries: Arc<RwLock<Vec<Delivery>>>,
    reject_all: Arc<RwLock<bool>>,
}

impl MockSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail, to exercise sink-failure
    /// reporting.
    pub fn reject_deliveries(&self) {
        *self.reject_all.write().unwrap() = true;
    }

    /// All deliveries recorded so far, in order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.read().unwrap().clone()
    }

    /// Number of deliveries recorded.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.read().unwrap().len()
    }

    /// Deliveries carrying a given tag.
    pub fn deliveries_for(&self, format: FormatTag) -> Vec<Delivery> {
        self.deliveries
            .read()
            .unwrap()
            .iter()
            .filter(|delivery| delivery.format == format)
            .cloned()
            .collect()
    }

    /// Forget all recorded deliveries.
    pub fn reset(&self) {
        self.deliveries.write().unwrap().clear();
    }
}

impl Clone for MockSink {
    fn clone(&self) -> Self {
        Self {
            deliveries: Arc::clone(&self.deliveries),
            reject_all: Arc::clone(&self.reject_all),
        }
    }
}

#[async_trait]
impl ResultSink for MockSink {
    async fn deliver(
        &self,
        records: RecordSet,
        format: FormatTag,
        display_name: &str,
    ) -> Result<()> {
        if *self.reject_all.read().unwrap() {
            return Err(IngestError::Sink("mock sink rejecting deliveries".into()));
        }

        self.deliveries.write().unwrap().push(Delivery {
            records,
            format,
            display_name: display_name.to_string(),
        });
        Ok(())
    }
}

/// An observer that records statuses, errors, and completion.
///
/// The status list mirrors what a progress overlay would show: one entry
/// per in-flight file, updated in place and removed on terminal states.
#[derive(Default)]
pub struct RecordingObserver {
    statuses: Arc<RwLock<Vec<ProcessingStatus>>>,
    errors: Arc<RwLock<Vec<(String, String)>>>,
    completed_batches: Arc<RwLock<usize>>,
}

impl RecordingObserver {
    /// Create an empty recording observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress entries still active (files that never reached a terminal
    /// state).
    pub fn active_statuses(&self) -> Vec<ProcessingStatus> {
        self.statuses.read().unwrap().clone()
    }

    /// Recorded `(message, file_name)` error pairs, in order.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.read().unwrap().clone()
    }

    /// Number of errors recorded.
    pub fn error_count(&self) -> usize {
        self.errors.read().unwrap().len()
    }

    /// How many batches ran to completion.
    pub fn completed_batches(&self) -> usize {
        *self.completed_batches.read().unwrap()
    }
}

impl Clone for RecordingObserver {
    fn clone(&self) -> Self {
        Self {
            statuses: Arc::clone(&self.statuses),
            errors: Arc::clone(&self.errors),
            completed_batches: Arc::clone(&self.completed_batches),
        }
    }
}

impl IngestObserver for RecordingObserver {
    fn status(&self, file_name: &str, status_text: &str, progress_percent: u8) {
        let mut statuses = self.statuses.write().unwrap();
        if let Some(existing) = statuses
            .iter_mut()
            .find(|status| status.file_name == file_name)
        {
            existing.status_text = status_text.to_string();
            existing.progress_percent = progress_percent;
        } else {
            statuses.push(ProcessingStatus {
                file_name: file_name.to_string(),
                status_text: status_text.to_string(),
                progress_percent,
            });
        }
    }

    fn remove_status(&self, file_name: &str) {
        self.statuses
            .write()
            .unwrap()
            .retain(|status| status.file_name != file_name);
    }

    fn error(&self, message: &str, file_name: &str) {
        self.errors
            .write()
            .unwrap()
            .push((message.to_string(), file_name.to_string()));
    }

    fn batch_complete(&self) {
        *self.completed_batches.write().unwrap() += 1;
    }
}
