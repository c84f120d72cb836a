//! The tagged union of every parsed output shape.

use serde::Serialize;

use crate::detect::FormatTag;
use crate::types::cdn::CdnRow;
use crate::types::loadbalancer::{
    ErrorSummaryEntry, LoadBalancerEntry, PerformanceEntry, SlowQueryEntry,
};
use crate::types::loadtest::LoadTestEntry;
use crate::types::metrics::MetricDataSet;
use crate::types::patterns::PatternEntry;
use crate::types::trace::{TraceMetricBundle, TraceMetricMap, TraceWorkflow};

/// The typed, validated output of parsing one file (or one completed join).
///
/// Every record in a set satisfies its format's required-field predicate;
/// rows that fail it are excluded during parsing, not defaulted.
///
/// There are no variants for the metric query/result halves on their own:
/// those payloads route through the joiner and reach the sink only as a
/// [`TraceMetricBundle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordSet {
    LoadBalancerSummary(Vec<LoadBalancerEntry>),
    LoadBalancerPerformance(Vec<PerformanceEntry>),
    SlowQueries(Vec<SlowQueryEntry>),
    ErrorSummary(Vec<ErrorSummaryEntry>),
    LoadTestMetrics(Vec<LoadTestEntry>),
    CdnCacheStats(Vec<CdnRow>),
    CdnPopularObjects(Vec<CdnRow>),
    CdnMetricSeries(MetricDataSet),
    LogPatterns(Vec<PatternEntry>),
    TraceWorkflows(Vec<TraceWorkflow>),
    TraceMetricMap(TraceMetricMap),
    TraceMetrics(TraceMetricBundle),
}

impl RecordSet {
    /// The format tag this set is delivered under.
    ///
    /// The joined query/result bundle goes out under the result tag; the
    /// sink can discriminate the richer payload on the variant itself.
    pub fn format_tag(&self) -> FormatTag {
        match self {
            Self::LoadBalancerSummary(_) => FormatTag::LoadBalancerSummary,
            Self::LoadBalancerPerformance(_) => FormatTag::LoadBalancerPerformance,
            Self::SlowQueries(_) => FormatTag::SlowQuery,
            Self::ErrorSummary(_) => FormatTag::ErrorSummary,
            Self::LoadTestMetrics(_) => FormatTag::LoadTestMetric,
            Self::CdnCacheStats(_) => FormatTag::CdnCacheStats,
            Self::CdnPopularObjects(_) => FormatTag::CdnPopularObjects,
            Self::CdnMetricSeries(_) => FormatTag::CdnMetricSeries,
            Self::LogPatterns(_) => FormatTag::LogPattern,
            Self::TraceWorkflows(_) => FormatTag::TraceWorkflow,
            Self::TraceMetricMap(_) => FormatTag::TraceMetricMap,
            Self::TraceMetrics(_) => FormatTag::TraceMetricResult,
        }
    }

    /// Number of records (rows, entries, or series) in the set.
    pub fn len(&self) -> usize {
        match self {
            Self::LoadBalancerSummary(rows) => rows.len(),
            Self::LoadBalancerPerformance(rows) => rows.len(),
            Self::SlowQueries(rows) => rows.len(),
            Self::ErrorSummary(rows) => rows.len(),
            Self::LoadTestMetrics(rows) => rows.len(),
            Self::CdnCacheStats(rows) => rows.len(),
            Self::CdnPopularObjects(rows) => rows.len(),
            Self::CdnMetricSeries(set) => set.metric_data_results.len(),
            Self::LogPatterns(rows) => rows.len(),
            Self::TraceWorkflows(rows) => rows.len(),
            Self::TraceMetricMap(map) => map.len(),
            Self::TraceMetrics(bundle) => bundle.results.metric_data_results.len(),
        }
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
