//! CDN report table rows.
//!
//! CDN exports carry report-specific column sets that can change between
//! report versions, so rows are kept as order-preserving maps of header
//! name to coerced cell rather than fixed structs. Every row is stamped
//! with the report's date range.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A coerced table cell.
///
/// Shape rules: an all-digit cell becomes `Int`, a digits-dot-digits cell
/// becomes `Float`, everything else stays trimmed text. Columns whose
/// header ends with `Pct` stay text regardless of shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// The cell as text, when it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The cell as a number, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// One CDN report row: column name to coerced cell, in column order, plus
/// the stamped `StartDateUTC` / `EndDateUTC` cells.
pub type CdnRow = IndexMap<String, CellValue>;

/// Header cell stamped onto every row with the report's start date.
pub const START_DATE_COLUMN: &str = "StartDateUTC";

/// Header cell stamped onto every row with the report's end date.
pub const END_DATE_COLUMN: &str = "EndDateUTC";
