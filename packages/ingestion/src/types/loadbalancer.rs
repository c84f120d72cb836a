//! Load-balancer record shapes: summary buckets, per-route performance,
//! slow requests, and the error digest.
//!
//! Field names mirror the telemetry column names exactly; the presentation
//! layer indexes records by those names.

use serde::{Deserialize, Serialize};

/// One processing-time bucket for one route/status/verb combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerEntry {
    pub normalized_url: String,
    pub elb_status_code: String,
    pub request_verb: String,
    pub processing_time_bucket: String,
    pub count: f64,
    pub total_requests: f64,
    pub percentage: f64,
}

/// Response-time statistics for one route and verb.
///
/// Only the five required columns gate row survival; percentile columns
/// that fail numeric parse coerce to NaN rather than dropping the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub base_url: String,
    pub request_verb: String,
    pub min_rt: f64,
    pub max_rt: f64,
    pub avg_rt: f64,
    #[serde(rename = "P25")]
    pub p25: f64,
    #[serde(rename = "P50")]
    pub p50: f64,
    #[serde(rename = "P60")]
    pub p60: f64,
    #[serde(rename = "P75")]
    pub p75: f64,
    #[serde(rename = "P90")]
    pub p90: f64,
    #[serde(rename = "P95")]
    pub p95: f64,
    pub total: f64,
    pub requests: f64,
}

/// One slow request, with the numeric path id pulled out of the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowQueryEntry {
    pub time: String,
    pub processing_time: f64,
    pub request_url: String,
    /// Last purely-numeric path segment of `request_url`; empty when the
    /// URL has none.
    pub pid: String,
    pub elb_status_code: String,
}

/// One aggregated error line: an occurrence count and the message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummaryEntry {
    pub count: u64,
    pub message: String,
}
