//! Synthetic load-test metric rows.

use serde::{Deserialize, Serialize};

/// One sampled metric from a load-test run.
///
/// Only `clock_time` and `metric` are required; the remaining columns pass
/// through as trimmed strings when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTestEntry {
    pub clock_time: String,
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
}
