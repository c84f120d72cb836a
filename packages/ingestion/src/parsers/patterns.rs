//! Log-pattern mining output parser.

use crate::error::{ParseError, ParseResult};
use crate::parsers::{from_json_value, parse_json_document};
use crate::types::patterns::PatternEntry;

/// Parse a mined-patterns JSON export: an array of objects each carrying
/// string `@pattern` and `@tokens` fields.
pub fn parse_patterns(content: &str) -> ParseResult<Vec<PatternEntry>> {
    let document = parse_json_document(content)?;
    if !document.is_array() {
        return Err(ParseError::invalid_shape("log pattern", "not an array"));
    }
    from_json_value(document, "log pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patterns() {
        let content = r#"[
            {"@pattern": "ERROR <*> timeout", "@tokens": "3", "@severityLabel": "high"},
            {"@pattern": "WARN retrying <*>", "@tokens": "2"}
        ]"#;
        let rows = parse_patterns(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pattern, "ERROR <*> timeout");
        assert_eq!(rows[0].severity_label.as_deref(), Some("high"));
        assert!(rows[1].severity_label.is_none());
    }

    #[test]
    fn test_non_array_rejected() {
        let err = parse_patterns(r#"{"@pattern":"x","@tokens":"y"}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidShape { .. }));
    }

    #[test]
    fn test_element_missing_required_field_rejected() {
        let content = r#"[{"@pattern": "ERROR <*>"}]"#;
        let err = parse_patterns(content).unwrap_err();
        assert!(matches!(err, ParseError::InvalidShape { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = parse_patterns("[{").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
