//! Cross-file join state for formats that arrive as companion files.
//!
//! Two independent families with identical mechanics: the metric
//! query/result pair merges into one combined payload; the
//! workflow/metric-map pair stays two payloads but neither is released
//! until both are present. State is session-scoped and owned by the
//! orchestrator; there is no module-level accumulator, so independent
//! sessions (and tests) cannot cross-contaminate.

use crate::types::metrics::MetricDataSet;
use crate::types::trace::{TraceMetricBundle, TraceMetricMap, TraceMetricQuery, TraceWorkflow};

/// One stored half of a join family: the payload plus the file it came
/// from.
#[derive(Debug, Clone)]
pub struct Half<T> {
    pub payload: T,
    pub file_name: String,
}

impl<T> Half<T> {
    fn new(payload: T, file_name: impl Into<String>) -> Self {
        Self {
            payload,
            file_name: file_name.into(),
        }
    }
}

/// Both halves of the workflow family, ready for delivery.
///
/// The two payloads are forwarded to the sink separately, but neither is
/// considered ready until the other has arrived.
#[derive(Debug, Clone)]
pub struct WorkflowPair {
    pub workflows: Half<Vec<TraceWorkflow>>,
    pub metrics: Half<TraceMetricMap>,
}

/// Session-scoped accumulator for the two join families.
///
/// Holds at most one half per side; a second file for an already-filled
/// half overwrites it (last write wins, no merging). A family emits its
/// combined output exactly once, when the second half arrives, and then
/// resets to empty.
#[derive(Debug, Default)]
pub struct JoinState {
    metric_query: Option<Half<Vec<TraceMetricQuery>>>,
    metric_result: Option<Half<MetricDataSet>>,
    workflows: Option<Half<Vec<TraceWorkflow>>>,
    metric_map: Option<Half<TraceMetricMap>>,
}

impl JoinState {
    /// Create an empty join state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the query half; returns the combined bundle and its display
    /// name when the result half is already present.
    pub fn offer_metric_query(
        &mut self,
        queries: Vec<TraceMetricQuery>,
        file_name: &str,
    ) -> Option<(TraceMetricBundle, String)> {
        self.metric_query = Some(Half::new(queries, file_name));
        self.try_metric_join()
    }

    /// Store the result half; returns the combined bundle and its display
    /// name when the query half is already present.
    pub fn offer_metric_result(
        &mut self,
        results: MetricDataSet,
        file_name: &str,
    ) -> Option<(TraceMetricBundle, String)> {
        self.metric_result = Some(Half::new(results, file_name));
        self.try_metric_join()
    }

    /// Store the workflow half; returns both halves when the metric map is
    /// already present.
    pub fn offer_workflows(
        &mut self,
        workflows: Vec<TraceWorkflow>,
        file_name: &str,
    ) -> Option<WorkflowPair> {
        self.workflows = Some(Half::new(workflows, file_name));
        self.try_workflow_join()
    }

    /// Store the metric-map half; returns both halves when the workflows
    /// are already present.
    pub fn offer_metric_map(
        &mut self,
        metrics: TraceMetricMap,
        file_name: &str,
    ) -> Option<WorkflowPair> {
        self.metric_map = Some(Half::new(metrics, file_name));
        self.try_workflow_join()
    }

    /// Whether any half is waiting for its companion.
    pub fn has_pending(&self) -> bool {
        self.metric_query.is_some()
            || self.metric_result.is_some()
            || self.workflows.is_some()
            || self.metric_map.is_some()
    }

    /// Drop all stored halves. Called when the session's loaded data is
    /// cleared.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn try_metric_join(&mut self) -> Option<(TraceMetricBundle, String)> {
        let (query, result) = match (self.metric_query.take(), self.metric_result.take()) {
            (Some(query), Some(result)) => (query, result),
            (query, result) => {
                self.metric_query = query;
                self.metric_result = result;
                return None;
            }
        };

        let display_name = format!("{}, {}", query.file_name, result.file_name);
        let bundle = TraceMetricBundle {
            results: result.payload,
            queries: query.payload,
        };
        Some((bundle, display_name))
    }

    fn try_workflow_join(&mut self) -> Option<WorkflowPair> {
        let (workflows, metrics) = match (self.workflows.take(), self.metric_map.take()) {
            (Some(workflows), Some(metrics)) => (workflows, metrics),
            (workflows, metrics) => {
                self.workflows = workflows;
                self.metric_map = metrics;
                return None;
            }
        };

        Some(WorkflowPair { workflows, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::trace::{Dimension, MetricIdentity, MetricStat};
    use indexmap::IndexMap;

    fn query(id: &str) -> TraceMetricQuery {
        TraceMetricQuery {
            id: id.to_string(),
            metric_stat: MetricStat {
                metric: MetricIdentity {
                    namespace: "AWS/ApplicationELB".to_string(),
                    metric_name: "RequestCount".to_string(),
                    dimensions: vec![Dimension {
                        name: "LoadBalancer".to_string(),
                        value: "app/prod".to_string(),
                    }],
                },
                period: Some(300),
                stat: Some("Sum".to_string()),
            },
            label: None,
            return_data: None,
        }
    }

    fn result_set() -> MetricDataSet {
        MetricDataSet {
            metric_data_results: Vec::new(),
            messages: Vec::new(),
        }
    }

    fn metric_map() -> TraceMetricMap {
        let mut map = IndexMap::new();
        map.insert("checkout.latency".to_string(), vec![(1.0, 2.0)]);
        map
    }

    #[test]
    fn test_single_half_never_emits() {
        let mut joins = JoinState::new();
        assert!(joins.offer_metric_query(vec![query("m1")], "query.json").is_none());
        assert!(joins.has_pending());
    }

    #[test]
    fn test_metric_join_emits_once_and_resets() {
        let mut joins = JoinState::new();
        assert!(joins.offer_metric_query(vec![query("m1")], "aws-metrics-query.json").is_none());

        let (bundle, display_name) = joins
            .offer_metric_result(result_set(), "aws-metrics-results.json")
            .expect("second half completes the join");

        assert_eq!(bundle.queries.len(), 1);
        assert_eq!(display_name, "aws-metrics-query.json, aws-metrics-results.json");
        // The family reset; another result alone does not emit.
        assert!(!joins.has_pending());
        assert!(joins.offer_metric_result(result_set(), "again.json").is_none());
    }

    #[test]
    fn test_second_query_overwrites_first() {
        let mut joins = JoinState::new();
        joins.offer_metric_query(vec![query("old")], "old-query.json");
        joins.offer_metric_query(vec![query("new")], "new-query.json");

        let (bundle, display_name) = joins
            .offer_metric_result(result_set(), "results.json")
            .expect("join completes");

        assert_eq!(bundle.queries[0].id, "new");
        assert_eq!(display_name, "new-query.json, results.json");
    }

    #[test]
    fn test_workflow_join_requires_both_halves() {
        let mut joins = JoinState::new();
        assert!(joins.offer_workflows(Vec::new(), "splunk-workflows.json").is_none());

        let pair = joins
            .offer_metric_map(metric_map(), "splunk-metrics.json")
            .expect("both halves present");

        assert_eq!(pair.workflows.file_name, "splunk-workflows.json");
        assert_eq!(pair.metrics.file_name, "splunk-metrics.json");
        assert!(!joins.has_pending());
    }

    #[test]
    fn test_families_are_independent() {
        let mut joins = JoinState::new();
        joins.offer_metric_query(vec![query("m1")], "query.json");

        // Completing the workflow family does not disturb the metric half.
        joins.offer_workflows(Vec::new(), "wf.json");
        let pair = joins.offer_metric_map(metric_map(), "metrics.json");
        assert!(pair.is_some());
        assert!(joins.has_pending());

        let joined = joins.offer_metric_result(result_set(), "results.json");
        assert!(joined.is_some());
    }

    #[test]
    fn test_clear_drops_pending_halves() {
        let mut joins = JoinState::new();
        joins.offer_metric_query(vec![query("m1")], "query.json");
        joins.clear();
        assert!(!joins.has_pending());
        assert!(joins.offer_metric_result(result_set(), "results.json").is_none());
    }
}
