//! Data model for assessment reports, model records, and benchmark payloads.
//!
//! Everything here mirrors the JSON documents served by the static data store.
//! Payloads are loosely typed at the source, so every field that can be absent
//! is an explicit `Option` (or carries `#[serde(default)]`) and is validated
//! once at the data-store boundary instead of at each render site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// OSAR (Open Source Assessment Report)
// ---------------------------------------------------------------------------

/// A complete OSAR document: schema version, the assessed asset, and one
/// entry per tool-based assessment that was executed against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsarReport {
    pub schema_version: Option<String>,
    #[serde(default)]
    pub asset: Asset,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

/// The software asset an OSAR report describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub environment: Option<String>,
    pub url: Option<String>,
}

/// One tool execution and its results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(default)]
    pub tool: ToolInfo,
    #[serde(default)]
    pub execution: Execution,
    #[serde(default)]
    pub results: Vec<AssessmentResult>,
}

/// The assessment tool that produced a result set (e.g. SAST, SBOM).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub tool_type: Option<String>,
    pub version: Option<String>,
    pub playbook: Option<String>,
}

/// Execution metadata for a single assessment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    #[serde(rename = "type")]
    pub exec_type: Option<String>,
    pub id: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub duration: Option<String>,
    pub output_path: Option<String>,
}

/// A single result row. `value` is an arbitrary scalar or structured value
/// and is rendered as text via [`crate::shape::display_text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub feature: Option<String>,
    pub aspect: Option<String>,
    pub attribute: Option<String>,
    pub value: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Model metadata
// ---------------------------------------------------------------------------

/// A model record from the data store's metadata list. Read-only; the UI
/// layer never mutates these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub organization: Option<String>,
    #[serde(rename = "type")]
    pub model_type: Option<String>,
    pub size: Option<String>,
    pub modality: Option<String>,
    pub license: Option<String>,
    pub access: Option<String>,
    pub created_date: Option<String>,
    pub url: Option<String>,
    pub model_url: Option<String>,
    pub dependencies: Vec<String>,
}

impl ModelRecord {
    /// Whether this record describes an LLM (the only type eligible for
    /// benchmark comparison).
    pub fn is_llm(&self) -> bool {
        self.model_type.as_deref() == Some("LLM")
    }

    /// Created date formatted for display (`YYYY-MM-DD`), or `-` when the
    /// field is absent or unparsable.
    pub fn created_date_display(&self) -> String {
        let Some(raw) = self.created_date.as_deref() else {
            return "-".to_string();
        };
        match raw.parse::<chrono::DateTime<chrono::Utc>>() {
            Ok(dt) => dt.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmark payloads
// ---------------------------------------------------------------------------

/// One entry of a MITRE detailed report: the judged responses for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitreEntry {
    pub judge_response: Option<JudgeResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeResponse {
    pub outputs: Vec<JudgeOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeOutput {
    pub text: Option<String>,
}

/// False Refusal Rate summary. All fields default to zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrrSummary {
    pub accept_count: u64,
    pub refusal_count: u64,
    pub refusal_rate: f64,
}

/// Threat-intelligence (MITRE ATT&CK reasoning) summary report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatIntelSummary {
    pub stat_per_model: ThreatIntelStats,
    pub stat_per_model_per_source: BTreeMap<String, SourceStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatIntelStats {
    pub total_score: f64,
    pub avg_score: f64,
    pub correct_mc_count: u64,
    pub incorrect_mc_count: u64,
    pub response_parsing_error_count: u64,
    pub fail_to_query_count: u64,
}

/// Per-source multiple-choice statistics of a threat-intelligence run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceStats {
    pub correct_mc_count: u64,
    pub incorrect_mc_count: u64,
    pub response_parsing_error_count: u64,
    pub fail_to_query_count: u64,
}

impl SourceStats {
    /// Total number of items attributed to this source.
    pub fn total(&self) -> u64 {
        self.correct_mc_count
            + self.incorrect_mc_count
            + self.response_parsing_error_count
            + self.fail_to_query_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_osar_report_deserializes_full_document() {
        let json = r#"{
            "schema_version": "1.0.0",
            "asset": {
                "type": "ML-Model",
                "name": "demo-model",
                "version": "2.1",
                "environment": "production",
                "url": "https://example.org/demo-model"
            },
            "assessments": [
                {
                    "tool": { "name": "sonarqube", "type": "sast", "version": "9.9", "playbook": "pb-sast" },
                    "execution": {
                        "type": "automated",
                        "id": "run-42",
                        "status": "success",
                        "timestamp": "2024-11-02T10:00:00Z",
                        "duration": "45s",
                        "output_path": "https://example.org/output.json"
                    },
                    "results": [
                        { "feature": "code", "aspect": "quality", "attribute": "bugs", "value": 3 }
                    ]
                }
            ]
        }"#;

        let report: OsarReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.schema_version.as_deref(), Some("1.0.0"));
        assert_eq!(report.asset.asset_type.as_deref(), Some("ML-Model"));
        assert_eq!(report.assessments.len(), 1);
        let assessment = &report.assessments[0];
        assert_eq!(assessment.tool.tool_type.as_deref(), Some("sast"));
        assert_eq!(assessment.results[0].value, Some(serde_json::json!(3)));
    }

    #[test]
    fn test_osar_report_tolerates_missing_fields() {
        let report: OsarReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.schema_version, None);
        assert_eq!(report.asset, Asset::default());
        assert!(report.assessments.is_empty());
    }

    #[test]
    fn test_model_record_defaults() {
        let record: ModelRecord = serde_json::from_str(r#"{ "name": "llama-guard" }"#).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.name, "llama-guard");
        assert_eq!(record.organization, None);
        assert!(record.dependencies.is_empty());
        assert!(!record.is_llm());
    }

    #[test]
    fn test_model_record_is_llm() {
        let record: ModelRecord =
            serde_json::from_str(r#"{ "name": "m", "type": "LLM" }"#).unwrap();
        assert!(record.is_llm());
    }

    #[test]
    fn test_created_date_display() {
        let mut record = ModelRecord {
            created_date: Some("2023-07-18T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(record.created_date_display(), "2023-07-18");

        record.created_date = Some("July 2023".to_string());
        assert_eq!(record.created_date_display(), "July 2023");

        record.created_date = None;
        assert_eq!(record.created_date_display(), "-");
    }

    #[test]
    fn test_frr_summary_defaults_to_zero() {
        let frr: FrrSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(frr.accept_count, 0);
        assert_eq!(frr.refusal_count, 0);
        assert_eq!(frr.refusal_rate, 0.0);
    }

    #[test]
    fn test_source_stats_total() {
        let stats = SourceStats {
            correct_mc_count: 4,
            incorrect_mc_count: 3,
            response_parsing_error_count: 2,
            fail_to_query_count: 1,
        };
        assert_eq!(stats.total(), 10);
    }
}
