//! CDN report parsers.
//!
//! The cache-statistics and popular-objects exports are delimited tables
//! wrapped in a fixed preamble: a report marker, a start/end date pair on
//! lines 4 and 5, and the table itself at a format-specific offset. The
//! marker is a content-level confirmation: a file whose name matched but
//! whose body lacks it is a parse error, not a detection failure.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, ParseResult};
use crate::parsers::from_json_str;
use crate::parsers::table::Table;
use crate::types::cdn::{CdnRow, CellValue, END_DATE_COLUMN, START_DATE_COLUMN};
use crate::types::metrics::MetricDataSet;

const CACHE_STATS_MARKER: &str = "\"Report\",\"CacheStatistics\"";
const POPULAR_OBJECTS_MARKER: &str = "\"Report\",\"PopularObjects\"";

/// Line offset of the data table in a cache-statistics export.
const CACHE_STATS_TABLE_OFFSET: usize = 9;

/// Line offset of the data table in a popular-objects export.
const POPULAR_OBJECTS_TABLE_OFFSET: usize = 7;

static INT_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static FLOAT_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

/// Parse a cache-statistics export into date-stamped rows.
pub fn parse_cache_statistics(content: &str) -> ParseResult<Vec<CdnRow>> {
    parse_report(
        content,
        CACHE_STATS_MARKER,
        CACHE_STATS_TABLE_OFFSET,
        "TimeBucket",
    )
}

/// Parse a popular-objects export into date-stamped rows.
pub fn parse_popular_objects(content: &str) -> ParseResult<Vec<CdnRow>> {
    parse_report(
        content,
        POPULAR_OBJECTS_MARKER,
        POPULAR_OBJECTS_TABLE_OFFSET,
        "Object",
    )
}

/// Parse a CDN metric-series JSON export.
pub fn parse_metric_series(content: &str) -> ParseResult<MetricDataSet> {
    from_json_str(content, "CDN metric series")
}

fn parse_report(
    content: &str,
    marker: &'static str,
    table_offset: usize,
    key_column: &str,
) -> ParseResult<Vec<CdnRow>> {
    if !content.contains(marker) {
        return Err(ParseError::MissingMarker { marker });
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let start_date = preamble_field(&lines, 3)?;
    let end_date = preamble_field(&lines, 4)?;

    let table_text = lines
        .get(table_offset..)
        .unwrap_or_default()
        .join("\n");
    let table = Table::read(&table_text)?;

    Ok(table.collect_rows(|row| {
        // Long exports repeat the header line mid-table; those rows carry
        // the column name in the key cell and are dropped with the rest.
        let key = row.required(key_column)?;
        if key == key_column {
            return None;
        }

        let mut record: CdnRow = row
            .cells()
            .map(|(header, cell)| (header.to_string(), coerce_cell(header, cell)))
            .collect();
        record.insert(
            START_DATE_COLUMN.to_string(),
            CellValue::Text(start_date.clone()),
        );
        record.insert(
            END_DATE_COLUMN.to_string(),
            CellValue::Text(end_date.clone()),
        );
        Some(record)
    }))
}

/// Second comma-separated field of a fixed preamble line, unquoted.
fn preamble_field(lines: &[&str], index: usize) -> ParseResult<String> {
    let line = lines.get(index).ok_or(ParseError::TruncatedPreamble {
        expected: index + 1,
        found: lines.len(),
    })?;
    let field = line.split(',').nth(1).ok_or_else(|| {
        ParseError::invalid_shape(
            "CDN report",
            format!("preamble line {} has no date field", index + 1),
        )
    })?;
    Ok(field.replace('"', "").trim().to_string())
}

/// Coerce one table cell by shape. `Pct`-suffixed columns stay text.
fn coerce_cell(header: &str, value: &str) -> CellValue {
    if header.ends_with("Pct") {
        return CellValue::Text(value.to_string());
    }
    if INT_SHAPE.is_match(value) {
        if let Ok(n) = value.parse::<i64>() {
            return CellValue::Int(n);
        }
        if let Ok(n) = value.parse::<f64>() {
            return CellValue::Float(n);
        }
    }
    if FLOAT_SHAPE.is_match(value) {
        if let Ok(n) = value.parse::<f64>() {
            return CellValue::Float(n);
        }
    }
    CellValue::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_stats_fixture() -> String {
        [
            "\"Version\",\"1.0\"",
            "\"Report\",\"CacheStatistics\"",
            "\"DistributionID\",\"E123ABC\"",
            "\"StartDateUTC\",\"2024-03-01 00:00\"",
            "\"EndDateUTC\",\"2024-03-07 23:59\"",
            "\"Grain\",\"HOUR\"",
            "\"ViewerLocation\",\"ALL\"",
            "\"Rows\",\"2\"",
            "",
            "DistributionID,TimeBucket,RequestCount,HitCount,TotalBytes,HitRate",
            "E123ABC,2024-03-01 00:00,1200,1100,52428800,91.66",
            "E123ABC,2024-03-01 01:00,900,800,31457280,88.88",
        ]
        .join("\n")
    }

    #[test]
    fn test_cache_statistics_rows_and_dates() {
        let rows = parse_cache_statistics(&cache_stats_fixture()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].get("StartDateUTC"),
            Some(&CellValue::Text("2024-03-01 00:00".to_string()))
        );
        assert_eq!(
            rows[1].get("EndDateUTC"),
            Some(&CellValue::Text("2024-03-07 23:59".to_string()))
        );
        assert_eq!(rows[0].get("RequestCount"), Some(&CellValue::Int(1200)));
        assert_eq!(rows[0].get("HitRate"), Some(&CellValue::Float(91.66)));
        assert_eq!(
            rows[0].get("TimeBucket"),
            Some(&CellValue::Text("2024-03-01 00:00".to_string()))
        );
    }

    #[test]
    fn test_missing_marker_is_rejected() {
        let content = cache_stats_fixture().replace("CacheStatistics", "SomethingElse");
        let err = parse_cache_statistics(&content).unwrap_err();
        assert!(matches!(err, ParseError::MissingMarker { .. }));
    }

    #[test]
    fn test_repeated_header_row_is_dropped() {
        let content = format!(
            "{}\nDistributionID,TimeBucket,RequestCount,HitCount,TotalBytes,HitRate",
            cache_stats_fixture()
        );
        let rows = parse_cache_statistics(&content).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_truncated_preamble() {
        let content = "\"Version\",\"1.0\"\n\"Report\",\"CacheStatistics\"";
        let err = parse_cache_statistics(content).unwrap_err();
        assert!(matches!(err, ParseError::TruncatedPreamble { .. }));
    }

    #[test]
    fn test_popular_objects_pct_columns_stay_text() {
        let content = [
            "\"Version\",\"1.0\"",
            "\"Report\",\"PopularObjects\"",
            "\"DistributionID\",\"E123ABC\"",
            "\"StartDateUTC\",\"2024-03-01 00:00\"",
            "\"EndDateUTC\",\"2024-03-07 23:59\"",
            "\"Rows\",\"1\"",
            "",
            "Object,RequestCount,HitCount,HitCountPct",
            "/assets/logo.png,5000,4700,94.00",
        ]
        .join("\n");

        let rows = parse_popular_objects(&content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("RequestCount"), Some(&CellValue::Int(5000)));
        assert_eq!(
            rows[0].get("HitCountPct"),
            Some(&CellValue::Text("94.00".to_string()))
        );
    }

    #[test]
    fn test_coerce_cell_shapes() {
        assert_eq!(coerce_cell("RequestCount", "42"), CellValue::Int(42));
        assert_eq!(coerce_cell("HitRate", "3.14"), CellValue::Float(3.14));
        assert_eq!(
            coerce_cell("TimeBucket", "2024-03-01"),
            CellValue::Text("2024-03-01".to_string())
        );
        // Negative and exponent forms do not match the shapes and stay text.
        assert_eq!(coerce_cell("Delta", "-5"), CellValue::Text("-5".to_string()));
        assert_eq!(
            coerce_cell("Value", "1e9"),
            CellValue::Text("1e9".to_string())
        );
    }

    #[test]
    fn test_metric_series_requires_results_array() {
        let valid = r#"{"MetricDataResults":[{"Id":"m1","Label":"Requests","Timestamps":["2024-03-01T00:00:00Z"],"Values":[1.0],"StatusCode":"Complete"}],"Messages":[]}"#;
        let series = parse_metric_series(valid).unwrap();
        assert_eq!(series.metric_data_results.len(), 1);
        assert_eq!(series.metric_data_results[0].id, "m1");

        let invalid = r#"{"Results":[]}"#;
        let err = parse_metric_series(invalid).unwrap_err();
        assert!(matches!(err, ParseError::InvalidShape { .. }));
    }
}
