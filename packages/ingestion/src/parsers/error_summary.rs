//! Line-oriented error-digest parser.
//!
//! Input is free text, one aggregated error per line: a leading count, then
//! either a double-quoted message, a brace-delimited JSON-looking literal,
//! or bare trailing text. Malformed lines are dropped silently; partial
//! success is expected for large digests.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::loadbalancer::ErrorSummaryEntry;

static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\d+)\s+(?:"([^"]+)"|(\{.*\})|(.+))$"#).unwrap()
});

/// Parse an error-summary digest. Never fails: lines that do not match the
/// grammar are skipped.
pub fn parse_error_summary(content: &str) -> Vec<ErrorSummaryEntry> {
    content
        .trim()
        .lines()
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<ErrorSummaryEntry> {
    let caps = LINE.captures(line)?;
    let count: u64 = caps[1].parse().ok()?;

    // Quoted and bare messages are trimmed; JSON-shaped text is kept
    // verbatim so it stays parseable downstream.
    let message = if let Some(quoted) = caps.get(2) {
        quoted.as_str().trim().to_string()
    } else if let Some(json) = caps.get(3) {
        json.as_str().to_string()
    } else {
        caps.get(4)?.as_str().trim().to_string()
    };

    Some(ErrorSummaryEntry { count, message })
}
