//! Reductions of per-test benchmark payloads into small summary shapes.
//!
//! Each benchmark publishes its own JSON layout; these functions are tolerant
//! of missing or misshapen fields and reduce to defined defaults instead of
//! erroring, since an incomplete report is a normal condition.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{FrrSummary, ThreatIntelSummary};

/// Success/fail counts reduced from a per-test summary report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestCounts {
    #[serde(alias = "success_count")]
    pub success: u64,
    #[serde(alias = "fail_count", alias = "failure_count")]
    pub fail: u64,
}

/// Reduce an arbitrary per-test summary payload to success/fail counts.
///
/// Only JSON objects are considered; derived deserializers also accept
/// sequences positionally, which would turn an array payload into bogus
/// counts instead of the documented defaults.
pub fn test_counts(payload: &Value) -> TestCounts {
    if !payload.is_object() {
        return TestCounts::default();
    }
    serde_json::from_value(payload.clone()).unwrap_or_default()
}

/// Reduce an FRR summary payload to accepted/rejected/rate, defaulting each
/// field to zero when the payload is not an object or its fields are absent
/// or misshapen.
pub fn frr_summary(payload: &Value) -> FrrSummary {
    if !payload.is_object() {
        return FrrSummary::default();
    }
    serde_json::from_value(payload.clone()).unwrap_or_default()
}

/// Per-source item total of a threat-intelligence run (the shape behind the
/// dashboard's source-distribution charts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTotal {
    pub source: String,
    pub total: u64,
}

/// Per-source totals in deterministic (alphabetical) source order.
pub fn threat_intel_sources(summary: &ThreatIntelSummary) -> Vec<SourceTotal> {
    summary
        .stat_per_model_per_source
        .iter()
        .map(|(source, stats)| SourceTotal {
            source: source.clone(),
            total: stats.total(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceStats;
    use serde_json::json;

    #[test]
    fn test_test_counts_reads_count_aliases() {
        let counts = test_counts(&json!({ "success_count": 42, "fail_count": 5 }));
        assert_eq!(counts, TestCounts { success: 42, fail: 5 });
    }

    #[test]
    fn test_test_counts_defaults_on_misshapen_payload() {
        assert_eq!(test_counts(&json!("not an object")), TestCounts::default());
        assert_eq!(test_counts(&json!({})), TestCounts::default());
        // Arrays must not be read positionally into the count fields.
        assert_eq!(test_counts(&json!([7, 9])), TestCounts::default());
    }

    #[test]
    fn test_frr_summary_shaping() {
        let frr = frr_summary(&json!({
            "accept_count": 90,
            "refusal_count": 10,
            "refusal_rate": 0.1
        }));
        assert_eq!(frr.accept_count, 90);
        assert_eq!(frr.refusal_count, 10);
        assert_eq!(frr.refusal_rate, 0.1);
    }

    #[test]
    fn test_frr_summary_defaults() {
        // An array payload positionally matches the struct fields if passed
        // straight to the derived deserializer; it must reduce to zeroes.
        let frr = frr_summary(&json!([1, 2, 3]));
        assert_eq!(frr, FrrSummary::default());
        assert_eq!(frr_summary(&json!(null)), FrrSummary::default());
        assert_eq!(frr_summary(&json!("oops")), FrrSummary::default());
    }

    #[test]
    fn test_threat_intel_sources_in_stable_order() {
        let mut summary = ThreatIntelSummary::default();
        summary.stat_per_model_per_source.insert(
            "NSA".to_string(),
            SourceStats {
                correct_mc_count: 2,
                incorrect_mc_count: 1,
                ..Default::default()
            },
        );
        summary.stat_per_model_per_source.insert(
            "CISA".to_string(),
            SourceStats {
                fail_to_query_count: 4,
                ..Default::default()
            },
        );

        let sources = threat_intel_sources(&summary);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].source, "CISA");
        assert_eq!(sources[0].total, 4);
        assert_eq!(sources[1].source, "NSA");
        assert_eq!(sources[1].total, 3);
    }
}
