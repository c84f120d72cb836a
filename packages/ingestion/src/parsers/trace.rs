//! Distributed-trace parsers: the metric query/result pair and the
//! workflow/metric-map pair.
//!
//! All four are validated here and then handed to the joiner by the
//! orchestrator; none of these payloads is delivered on its own.

use serde_json::Value;

use crate::error::{ParseError, ParseResult};
use crate::parsers::{from_json_str, from_json_value, parse_json_document};
use crate::types::metrics::MetricDataSet;
use crate::types::trace::{TraceMetricMap, TraceMetricQuery, TraceWorkflow};

/// Parse the query half of the metric pair: an array of query definitions.
pub fn parse_metric_query(content: &str) -> ParseResult<Vec<TraceMetricQuery>> {
    from_json_str(content, "trace metric query")
}

/// Parse the result half of the metric pair: a metric-data export.
pub fn parse_metric_result(content: &str) -> ParseResult<MetricDataSet> {
    from_json_str(content, "trace metric result")
}

/// Parse a workflow export: an array of workflow rows, optionally wrapped
/// in a `{"rs": [...]}` envelope.
pub fn parse_workflows(content: &str) -> ParseResult<Vec<TraceWorkflow>> {
    let document = parse_json_document(content)?;
    let payload = match document {
        Value::Object(mut map) if map.get("rs").is_some_and(Value::is_array) => {
            map.remove("rs").unwrap_or(Value::Null)
        }
        other => other,
    };
    from_json_value(payload, "trace workflow")
}

/// Parse a metric-map export: series name to `[timestamp, value]` pairs,
/// optionally wrapped in a `{"data": {...}}` envelope.
pub fn parse_metric_map(content: &str) -> ParseResult<TraceMetricMap> {
    let document = parse_json_document(content)?;
    let payload = match document {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    if !payload.is_object() {
        return Err(ParseError::invalid_shape(
            "trace metric map",
            "expected an object of series",
        ));
    }
    from_json_value(payload, "trace metric map")
}
