//! Header-plus-rows delimited-table parsers.
//!
//! Shared policy: every cell is trimmed; a row missing any required column,
//! or whose required numeric column fails to parse, is dropped rather than
//! defaulted. Dropping is silent; record counts are the observable
//! contract, not warnings.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseResult;
use crate::types::loadbalancer::{LoadBalancerEntry, PerformanceEntry, SlowQueryEntry};
use crate::types::loadtest::LoadTestEntry;

/// Last purely-numeric path segment, optionally followed by one more
/// segment, e.g. `/players/12345` or `/players/12345/profile`.
static PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)(?:/[^/]+)?$").unwrap());

/// A parsed delimited table: trimmed headers plus trimmed data rows.
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    /// Read a table from delimited text.
    ///
    /// Flexible row widths match the lenient reader the telemetry tools
    /// assume; a header-only input yields a table with zero rows.
    pub(crate) fn read(content: &str) -> ParseResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }

        Ok(Self { headers, rows })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Map each data row through `build`, dropping rows where it returns
    /// `None`.
    pub(crate) fn collect_rows<'t, T>(
        &'t self,
        build: impl Fn(Row<'t>) -> Option<T>,
    ) -> Vec<T> {
        self.rows
            .iter()
            .map(|record| Row { table: self, record })
            .filter_map(build)
            .collect()
    }
}

/// A single data row viewed through the table's header.
pub(crate) struct Row<'a> {
    table: &'a Table,
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    /// Cell under `column`, when that column exists.
    pub(crate) fn get(&self, column: &str) -> Option<&str> {
        self.record.get(self.table.column(column)?)
    }

    /// Non-empty cell under `column`.
    pub(crate) fn required(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|cell| !cell.is_empty())
    }

    /// Cell parsed as a number; `None` when missing or non-numeric.
    pub(crate) fn number(&self, column: &str) -> Option<f64> {
        self.get(column)?.parse().ok()
    }

    /// Cell parsed as a number, coercing failures to NaN instead of
    /// dropping the row.
    pub(crate) fn number_or_nan(&self, column: &str) -> f64 {
        self.number(column).unwrap_or(f64::NAN)
    }

    /// All cells paired with their header names, in column order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table
            .headers
            .iter()
            .map(String::as_str)
            .zip(self.record.iter())
    }
}

/// Parse a load-balancer summary table: one row per route/status/verb
/// bucket.
pub fn parse_load_balancer_summary(content: &str) -> ParseResult<Vec<LoadBalancerEntry>> {
    let table = Table::read(content)?;
    Ok(table.collect_rows(|row| {
        Some(LoadBalancerEntry {
            normalized_url: row.required("normalized_url")?.to_string(),
            elb_status_code: row.required("elb_status_code")?.to_string(),
            request_verb: row.required("request_verb")?.to_string(),
            processing_time_bucket: row.required("processing_time_bucket")?.to_string(),
            count: row.number("count")?,
            total_requests: row.number("total_requests")?,
            percentage: row.number("percentage")?,
        })
    }))
}

/// Parse a load-balancer performance table: response-time statistics per
/// route and verb.
pub fn parse_performance(content: &str) -> ParseResult<Vec<PerformanceEntry>> {
    let table = Table::read(content)?;
    Ok(table.collect_rows(|row| {
        Some(PerformanceEntry {
            base_url: row.required("base_url")?.to_string(),
            request_verb: row.required("request_verb")?.to_string(),
            min_rt: row.number("min_rt")?,
            max_rt: row.number("max_rt")?,
            avg_rt: row.number("avg_rt")?,
            p25: row.number_or_nan("P25"),
            p50: row.number_or_nan("P50"),
            p60: row.number_or_nan("P60"),
            p75: row.number_or_nan("P75"),
            p90: row.number_or_nan("P90"),
            p95: row.number_or_nan("P95"),
            total: row.number_or_nan("total"),
            requests: row.number_or_nan("requests"),
        })
    }))
}

/// Parse a slow-query table, deriving the numeric path id from each
/// request URL.
pub fn parse_slow_queries(content: &str) -> ParseResult<Vec<SlowQueryEntry>> {
    let table = Table::read(content)?;
    Ok(table.collect_rows(|row| {
        let request_url = row.required("request_url")?;
        Some(SlowQueryEntry {
            time: row.required("time")?.to_string(),
            processing_time: row.number("processing_time")?,
            pid: extract_path_id(request_url),
            request_url: request_url.to_string(),
            elb_status_code: row.required("elb_status_code")?.to_string(),
        })
    }))
}

/// Parse a load-test metric table. Non-required columns pass through as
/// trimmed strings.
pub fn parse_load_test(content: &str) -> ParseResult<Vec<LoadTestEntry>> {
    let table = Table::read(content)?;
    Ok(table.collect_rows(|row| {
        Some(LoadTestEntry {
            clock_time: row.required("clock_time")?.to_string(),
            metric: row.required("metric")?.to_string(),
            transaction: row.get("transaction").map(str::to_string),
            val: row.get("val").map(str::to_string),
            time_stamp: row.get("time_stamp").map(str::to_string),
        })
    }))
}

/// Extract the trailing numeric path segment from a request URL; empty
/// when the URL has none.
fn extract_path_id(url: &str) -> String {
    PATH_ID
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERFORMANCE_CSV: &str = "\
base_url,request_verb,min_rt,max_rt,avg_rt,P25,P50,P60,P75,P90,P95,total,requests
/api/users,GET,0.001,1.2,0.2,0.05,0.1,0.12,0.18,0.4,0.8,240.5,1200
/api/orders,POST,0.002,2.5,0.4,0.1,0.2,0.25,0.35,0.9,1.5,480.0,1200
";

    #[test]
    fn test_performance_round_trip() {
        let rows = parse_performance(PERFORMANCE_CSV).unwrap();

        assert_eq!(rows.len(), 2);
        // Row order is preserved.
        assert_eq!(rows[0].base_url, "/api/users");
        assert_eq!(rows[1].base_url, "/api/orders");
        assert_eq!(rows[0].min_rt, 0.001);
        assert_eq!(rows[1].p95, 1.5);
        assert_eq!(rows[1].requests, 1200.0);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_performance(PERFORMANCE_CSV).unwrap();
        let second = parse_performance(PERFORMANCE_CSV).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_only_yields_empty_set() {
        let rows =
            parse_performance("base_url,request_verb,min_rt,max_rt,avg_rt\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_required_column_drops_every_row() {
        // No avg_rt column at all: nothing survives, but no error either.
        let csv = "base_url,request_verb,min_rt,max_rt\n/a,GET,0.1,0.2\n/b,POST,0.1,0.2\n";
        let rows = parse_performance(csv).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_non_numeric_required_cell_drops_row() {
        let csv = "\
base_url,request_verb,min_rt,max_rt,avg_rt
/a,GET,0.1,0.2,0.15
/b,GET,slow,0.2,0.15
";
        let rows = parse_performance(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].base_url, "/a");
    }

    #[test]
    fn test_missing_percentile_coerces_to_nan() {
        let csv = "base_url,request_verb,min_rt,max_rt,avg_rt\n/a,GET,0.1,0.2,0.15\n";
        let rows = parse_performance(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].p50.is_nan());
    }

    #[test]
    fn test_summary_drops_row_missing_count() {
        let csv = "\
normalized_url,elb_status_code,request_verb,processing_time_bucket,count,total_requests,percentage
/api/a,200,GET,0-100ms,10,100,10.0
/api/b,200,GET,0-100ms,,100,5.0
/api/c,500,POST,100-500ms,3,100,3.0
";
        let rows = parse_load_balancer_summary(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].normalized_url, "/api/a");
        assert_eq!(rows[1].normalized_url, "/api/c");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let csv = "\
normalized_url,elb_status_code,request_verb,processing_time_bucket,count,total_requests,percentage
  /api/a  , 200 , GET , 0-100ms , 10 , 100 , 10.0
";
        let rows = parse_load_balancer_summary(csv).unwrap();
        assert_eq!(rows[0].normalized_url, "/api/a");
        assert_eq!(rows[0].elb_status_code, "200");
    }

    #[test]
    fn test_slow_query_path_id() {
        let csv = "\
time,processing_time,request_url,elb_status_code
2024-01-01T00:00:00,5.2,/api/players/12345,200
2024-01-01T00:00:01,6.1,/api/players/67890/profile,200
2024-01-01T00:00:02,7.0,/api/health,200
";
        let rows = parse_slow_queries(csv).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].pid, "12345");
        assert_eq!(rows[1].pid, "67890");
        assert_eq!(rows[2].pid, "");
    }

    #[test]
    fn test_path_id_requires_trailing_position() {
        // The numeric segment must be last or second to last.
        assert_eq!(extract_path_id("/players/123/profile/settings"), "");
        assert_eq!(extract_path_id("/players/123/profile"), "123");
        assert_eq!(extract_path_id("/players/123"), "123");
        assert_eq!(extract_path_id(""), "");
    }

    #[test]
    fn test_load_test_passthrough_columns() {
        let csv = "\
clock_time,metric,transaction,val,time_stamp
00:00:01,tps,login,12.5,1700000000
00:00:02,tps,,13.1,1700000001
";
        let rows = parse_load_test(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction.as_deref(), Some("login"));
        assert_eq!(rows[1].transaction.as_deref(), Some(""));
        assert_eq!(rows[1].val.as_deref(), Some("13.1"));
    }

    #[test]
    fn test_load_test_requires_metric() {
        let csv = "clock_time,metric\n00:00:01,\n00:00:02,tps\n";
        let rows = parse_load_test(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].clock_time, "00:00:02");
    }
}
