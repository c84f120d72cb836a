//! The delivery seam to the presentation layer.

use async_trait::async_trait;

use crate::detect::FormatTag;
use crate::error::Result;
use crate::types::record_set::RecordSet;

/// Receives parsed record sets from the orchestrator.
///
/// Called once per successfully parsed standalone file and once per
/// completed join emission. The sink takes ownership of the records; the
/// pipeline keeps no reference afterward.
///
/// A delivery failure is reported against the originating file and does
/// not abort the rest of the batch.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Accept one record set.
    ///
    /// `format` always equals `records.format_tag()`; it is passed
    /// separately so sinks can route without matching on the payload.
    async fn deliver(
        &self,
        records: RecordSet,
        format: FormatTag,
        display_name: &str,
    ) -> Result<()>;
}
