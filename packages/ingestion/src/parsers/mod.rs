//! Per-format parsers.
//!
//! Each parser is a pure function from file content to a validated record
//! collection. Structural validation failures come back as
//! [`ParseError`](crate::error::ParseError) with a format-specific reason;
//! the orchestrator reports them per file and moves on.

pub mod cdn;
pub mod error_summary;
pub mod patterns;
pub mod table;
pub mod trace;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, ParseResult};

/// Parse a JSON document, stripping any leading UTF-8 BOM.
///
/// Syntax failures surface as [`ParseError::Json`]; shape checks happen in
/// the callers.
pub(crate) fn parse_json_document(content: &str) -> ParseResult<Value> {
    let content = content.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(content)?)
}

/// Deserialize a JSON document straight into a typed payload.
///
/// Malformed JSON stays a [`ParseError::Json`]; a document that parses but
/// fails the format's shape becomes [`ParseError::InvalidShape`].
pub(crate) fn from_json_str<T: DeserializeOwned>(
    content: &str,
    format: &'static str,
) -> ParseResult<T> {
    let content = content.trim_start_matches('\u{feff}');
    serde_json::from_str(content).map_err(|err| {
        if err.is_data() {
            ParseError::invalid_shape(format, err.to_string())
        } else {
            ParseError::Json(err)
        }
    })
}

/// Deserialize an already-parsed JSON value into a typed payload.
pub(crate) fn from_json_value<T: DeserializeOwned>(
    value: Value,
    format: &'static str,
) -> ParseResult<T> {
    serde_json::from_value(value).map_err(|err| ParseError::invalid_shape(format, err.to_string()))
}
