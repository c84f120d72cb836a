//! CloudWatch-style metric data exports.
//!
//! Both the CDN metric series format and the distributed-trace metric
//! result format are `GetMetricData` dumps with the same shape, so they
//! share one record type.

use serde::{Deserialize, Serialize};

/// A metric-data export: one entry per queried series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataSet {
    #[serde(rename = "MetricDataResults")]
    pub metric_data_results: Vec<MetricDataEntry>,

    #[serde(rename = "Messages", default)]
    pub messages: Vec<serde_json::Value>,
}

/// One series of a metric-data export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataEntry {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Label")]
    pub label: String,

    #[serde(rename = "Timestamps")]
    pub timestamps: Vec<String>,

    #[serde(rename = "Values")]
    pub values: Vec<f64>,

    #[serde(rename = "StatusCode")]
    pub status_code: String,
}
