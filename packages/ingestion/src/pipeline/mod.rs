//! The ingestion pipeline: batch orchestration over detection, parsing,
//! and cross-file joins.

pub mod ingest;

pub use ingest::{BatchReport, FileFailure, Ingestor};
