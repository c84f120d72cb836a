//! Telemetry File Ingestion Library
//!
//! A classification and parsing pipeline for heterogeneous
//! performance-telemetry exports: load-balancer logs, CDN cache reports,
//! synthetic load-test results, distributed-trace metrics, and log-pattern
//! mining output. Files come in as opaque `(name, bytes)` pairs; each one
//! is classified by name, parsed into a typed record set, and handed to a
//! result sink, or reported as a per-file failure.
//!
//! # Design Philosophy
//!
//! - Detection is filename-based; validation is content-based. The two
//!   never mix: a mismatch between name and body is a parse error, not a
//!   detection failure.
//! - Parsers are pure functions; all mutable state (pending join halves,
//!   progress entries) lives in the orchestrator's session.
//! - Failures are local. One bad file never aborts the rest of a batch.
//! - Malformed rows inside an otherwise-valid file are dropped, not
//!   defaulted; final record counts are the contract.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ingestion::{Ingestor, RawFile};
//! use ingestion::testing::MockSink;
//!
//! let sink = MockSink::new();
//! let mut ingestor = Ingestor::new(sink.clone());
//!
//! let batch = vec![RawFile::new("prod-summary-results.csv", csv_bytes)];
//! let report = ingestor.ingest_batch(batch).await?;
//!
//! assert!(report.is_success());
//! assert_eq!(sink.delivery_count(), 1);
//! ```
//!
//! # Modules
//!
//! - [`detect`] - Filename-based format detection
//! - [`parsers`] - Per-format parsers (delimited tables, line digests, JSON)
//! - [`joiner`] - Cross-file join state for companion-file formats
//! - [`pipeline`] - The batch orchestrator
//! - [`traits`] - `ResultSink` and `IngestObserver` seams
//! - [`types`] - Typed record shapes per format family
//! - [`testing`] - Recording sink/observer for tests

pub mod archive;
pub mod detect;
pub mod error;
pub mod joiner;
pub mod parsers;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use detect::{detect, FormatTag};
pub use error::{IngestError, ParseError};
pub use joiner::{Half, JoinState, WorkflowPair};
pub use pipeline::{BatchReport, FileFailure, Ingestor};
pub use traits::{
    observer::{IngestObserver, NoopObserver, ProcessingStatus},
    sink::ResultSink,
};
pub use types::{
    cdn::{CdnRow, CellValue},
    file::RawFile,
    loadbalancer::{ErrorSummaryEntry, LoadBalancerEntry, PerformanceEntry, SlowQueryEntry},
    loadtest::LoadTestEntry,
    metrics::{MetricDataEntry, MetricDataSet},
    patterns::PatternEntry,
    record_set::RecordSet,
    trace::{TraceMetricBundle, TraceMetricMap, TraceMetricQuery, TraceWorkflow},
};

// Re-export parser entry points
pub use parsers::{
    cdn::{parse_cache_statistics, parse_metric_series, parse_popular_objects},
    error_summary::parse_error_summary,
    patterns::parse_patterns,
    table::{parse_load_balancer_summary, parse_load_test, parse_performance, parse_slow_queries},
    trace::{parse_metric_map, parse_metric_query, parse_metric_result, parse_workflows},
};

// Re-export archive expansion
pub use archive::expand_archive;

// Re-export testing utilities
pub use testing::{Delivery, MockSink, RecordingObserver};
