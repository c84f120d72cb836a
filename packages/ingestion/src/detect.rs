//! Filename-based format detection.
//!
//! Detection consults the file name only. Content-level confirmation is a
//! parser's job: a file that names itself a CDN statistics export but lacks
//! the report marker fails at parse time, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification label assigned to exactly one ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    #[serde(rename = "load-balancer-summary")]
    LoadBalancerSummary,
    #[serde(rename = "load-balancer-performance")]
    LoadBalancerPerformance,
    #[serde(rename = "slow-query")]
    SlowQuery,
    #[serde(rename = "error-summary")]
    ErrorSummary,
    #[serde(rename = "load-test-metric")]
    LoadTestMetric,
    #[serde(rename = "cdn-cache-stats")]
    CdnCacheStats,
    #[serde(rename = "cdn-popular-objects")]
    CdnPopularObjects,
    #[serde(rename = "cdn-metric-series")]
    CdnMetricSeries,
    #[serde(rename = "log-pattern")]
    LogPattern,
    #[serde(rename = "distributed-trace-metric-query")]
    TraceMetricQuery,
    #[serde(rename = "distributed-trace-metric-result")]
    TraceMetricResult,
    #[serde(rename = "trace-workflow")]
    TraceWorkflow,
    #[serde(rename = "trace-metric-series-map")]
    TraceMetricMap,
}

impl FormatTag {
    /// Stable string form used in logs and deliveries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadBalancerSummary => "load-balancer-summary",
            Self::LoadBalancerPerformance => "load-balancer-performance",
            Self::SlowQuery => "slow-query",
            Self::ErrorSummary => "error-summary",
            Self::LoadTestMetric => "load-test-metric",
            Self::CdnCacheStats => "cdn-cache-stats",
            Self::CdnPopularObjects => "cdn-popular-objects",
            Self::CdnMetricSeries => "cdn-metric-series",
            Self::LogPattern => "log-pattern",
            Self::TraceMetricQuery => "distributed-trace-metric-query",
            Self::TraceMetricResult => "distributed-trace-metric-result",
            Self::TraceWorkflow => "trace-workflow",
            Self::TraceMetricMap => "trace-metric-series-map",
        }
    }

    /// Human-readable name shown in progress updates.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LoadBalancerSummary => "Load Balancer Summary",
            Self::LoadBalancerPerformance => "Load Balancer Performance",
            Self::SlowQuery => "Slow Queries",
            Self::ErrorSummary => "Error Summary",
            Self::LoadTestMetric => "Load Test Metrics",
            Self::CdnCacheStats => "CDN Cache Statistics",
            Self::CdnPopularObjects => "CDN Popular Objects",
            Self::CdnMetricSeries => "CDN Metric Series",
            Self::LogPattern => "Log Patterns",
            Self::TraceMetricQuery => "Trace Metric Query",
            Self::TraceMetricResult => "Trace Metric Results",
            Self::TraceWorkflow => "Trace Workflows",
            Self::TraceMetricMap => "Trace Metric Map",
        }
    }

    /// Whether payloads for this tag route through the joiner instead of
    /// being delivered directly.
    pub fn is_joined(&self) -> bool {
        matches!(
            self,
            Self::TraceMetricQuery
                | Self::TraceMetricResult
                | Self::TraceWorkflow
                | Self::TraceMetricMap
        )
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a file name to its format tag.
///
/// First match wins; some filename substrings overlap, so the ladder order
/// is load bearing. All checks are case-insensitive. Returns `None` for an
/// unrecognized name, which the orchestrator reports as a per-file failure.
pub fn detect(file_name: &str) -> Option<FormatTag> {
    let name = file_name.to_lowercase();

    if name.contains("summary-results") && name.ends_with(".csv") {
        return Some(FormatTag::LoadBalancerSummary);
    }
    if name.contains("stats-results") && name.ends_with(".csv") {
        return Some(FormatTag::LoadBalancerPerformance);
    }
    if name.contains("slow-results") && name.ends_with(".csv") {
        return Some(FormatTag::SlowQuery);
    }
    if name.contains("errors.summary") && name.ends_with(".txt") {
        return Some(FormatTag::ErrorSummary);
    }
    if name.contains("report-run") && name.ends_with(".csv") {
        return Some(FormatTag::LoadTestMetric);
    }
    if name.contains("cachestatistics") && name.ends_with(".csv") {
        return Some(FormatTag::CdnCacheStats);
    }
    if name.contains("popularobjects") && name.ends_with(".csv") {
        return Some(FormatTag::CdnPopularObjects);
    }
    if name.starts_with("cfstats") && name.ends_with(".json") {
        return Some(FormatTag::CdnMetricSeries);
    }
    if name.contains("patterns") && name.ends_with(".json") {
        return Some(FormatTag::LogPattern);
    }
    if name.contains("aws-metrics") {
        if name.contains("query") {
            return Some(FormatTag::TraceMetricQuery);
        }
        if name.contains("results") {
            return Some(FormatTag::TraceMetricResult);
        }
    }
    if name.contains("splunk-workflows") && name.ends_with(".json") {
        return Some(FormatTag::TraceWorkflow);
    }
    if name.contains("splunk-metrics") && name.ends_with(".json") {
        return Some(FormatTag::TraceMetricMap);
    }

    None
}
