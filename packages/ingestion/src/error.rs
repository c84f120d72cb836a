//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. `ParseError` covers failures
//! inside a single parser; `IngestError` is what the orchestrator reports
//! per file. Neither aborts a batch.

use thiserror::Error;

/// Errors raised while parsing one file's content.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Content parsed as the expected container type but failed the
    /// format's required-shape predicate
    #[error("invalid {format} format: {reason}")]
    InvalidShape {
        format: &'static str,
        reason: String,
    },

    /// A content-level marker the format requires was absent
    #[error("missing {marker} marker")]
    MissingMarker { marker: &'static str },

    /// The fixed preamble lines a format expects were not present
    #[error("truncated preamble: expected at least {expected} lines, found {found}")]
    TruncatedPreamble { expected: usize, found: usize },

    /// Malformed JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed delimited text
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

impl ParseError {
    /// Shorthand for a shape failure with a format label and reason.
    pub fn invalid_shape(format: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            format,
            reason: reason.into(),
        }
    }
}

/// Per-file errors reported by the ingestion orchestrator.
///
/// All variants are local to the file that caused them; the orchestrator
/// continues with the rest of the batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Filename matched no known format
    #[error("unrecognized file format or naming convention")]
    UnrecognizedFormat,

    /// Zero-length or whitespace-only input
    #[error("file is empty")]
    EmptyFile,

    /// Archive contained no members with a supported extension
    #[error("archive contains no supported files")]
    EmptyArchive,

    /// Archive could not be opened or a member could not be read
    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Parsing failed
    #[error("error processing file: {0}")]
    Parse(#[from] ParseError),

    /// The result sink rejected a delivery
    #[error("delivery failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The batch itself contained no files
    #[error("no files supplied")]
    EmptyBatch,
}

/// Result type alias for parser operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
