//! Distributed-trace record shapes: the metric query/result pair and the
//! workflow/metric-map pair.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::metrics::MetricDataSet;

/// One metric query definition, the first half of the query/result pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMetricQuery {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "MetricStat")]
    pub metric_stat: MetricStat,

    #[serde(rename = "Label", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "ReturnData", default, skip_serializing_if = "Option::is_none")]
    pub return_data: Option<bool>,
}

/// The metric identity and sampling parameters of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStat {
    #[serde(rename = "Metric")]
    pub metric: MetricIdentity,

    #[serde(rename = "Period", default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,

    #[serde(rename = "Stat", default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
}

/// Namespace, name, and dimensions identifying one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricIdentity {
    #[serde(rename = "Namespace")]
    pub namespace: String,

    #[serde(rename = "MetricName")]
    pub metric_name: String,

    #[serde(rename = "Dimensions")]
    pub dimensions: Vec<Dimension>,
}

/// One dimension of a metric identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Value")]
    pub value: String,
}

/// The joined query/result payload: the result export plus the queries
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceMetricBundle {
    #[serde(flatten)]
    pub results: MetricDataSet,

    #[serde(rename = "Queries")]
    pub queries: Vec<TraceMetricQuery>,
}

/// One instrumented workflow row of the trace-workflow export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceWorkflow {
    pub sf_workflow: String,
    pub sf_metric: String,
    pub sf_id: String,
    pub sf_error: String,
}

/// Series name to `[timestamp, value]` pairs, in export order.
pub type TraceMetricMap = IndexMap<String, Vec<(f64, f64)>>;
