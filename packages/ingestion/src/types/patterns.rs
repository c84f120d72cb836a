//! Log-pattern mining output.

use serde::{Deserialize, Serialize};

/// One mined log pattern.
///
/// Only `@pattern` and `@tokens` are required; the companion fields the
/// miner emits are carried when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    #[serde(rename = "@pattern")]
    pub pattern: String,

    #[serde(rename = "@tokens")]
    pub tokens: String,

    #[serde(rename = "@visualization", default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,

    #[serde(rename = "@ratio", default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,

    #[serde(rename = "@relatedPattern", default, skip_serializing_if = "Option::is_none")]
    pub related_pattern: Option<String>,

    #[serde(rename = "@PatternId", default, skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<String>,

    #[serde(rename = "@regexString", default, skip_serializing_if = "Option::is_none")]
    pub regex_string: Option<String>,

    #[serde(rename = "@sampleCount", default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<String>,

    #[serde(rename = "@logSamples", default, skip_serializing_if = "Option::is_none")]
    pub log_samples: Option<String>,

    #[serde(rename = "@severityLabel", default, skip_serializing_if = "Option::is_none")]
    pub severity_label: Option<String>,
}
