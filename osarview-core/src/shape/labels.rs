//! Tool-type display labels.
//!
//! The data store spells tool types inconsistently (`"SBOM"`, `"sbom"`,
//! `"criticality_score"`, `"Criticality Score"`), so lookups go through a
//! canonical form: lowercased with hyphens, underscores, and whitespace
//! stripped. Both the query and the table keys are canonicalized with the
//! same function, so any separator/casing variant of a known key resolves to
//! the same label.

/// Display labels keyed by tool type, as spelled in OSAR documents.
const TOOL_TYPE_LABELS: &[(&str, &str)] = &[
    ("insecure-code-detection", "Insecure Code Detection"),
    ("sbom", "SBOM"),
    ("criticality_score", "Criticality Score"),
    ("scorecard", "Scorecard"),
    ("sast", "SAST"),
    ("license-compliance", "License Compliance"),
    ("dast", "DAST"),
    ("llm-benchmark", "LLM Benchmark"),
    ("security-benchmark", "Security Benchmark"),
];

fn canonical(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map a tool-type string to its display label.
///
/// Unknown types fall back to the raw string unchanged; an absent or empty
/// type falls back to the generic `"Assessment"` placeholder.
pub fn tool_type_label(tool_type: Option<&str>) -> String {
    let Some(raw) = tool_type.filter(|s| !s.trim().is_empty()) else {
        return "Assessment".to_string();
    };
    let wanted = canonical(raw);
    TOOL_TYPE_LABELS
        .iter()
        .find(|(key, _)| canonical(key) == wanted)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_types_map_to_labels() {
        assert_eq!(tool_type_label(Some("sast")), "SAST");
        assert_eq!(tool_type_label(Some("llm-benchmark")), "LLM Benchmark");
        assert_eq!(
            tool_type_label(Some("insecure-code-detection")),
            "Insecure Code Detection"
        );
    }

    #[test]
    fn test_casing_and_separator_variants_resolve_identically() {
        for variant in ["SBOM", "sbom", "S_B_O_M", "s-b-o-m", "S B O M"] {
            assert_eq!(tool_type_label(Some(variant)), "SBOM", "variant {variant}");
        }
        for variant in [
            "criticality_score",
            "criticality-score",
            "Criticality Score",
            "CRITICALITY_SCORE",
        ] {
            assert_eq!(tool_type_label(Some(variant)), "Criticality Score");
        }
    }

    #[test]
    fn test_unknown_type_returns_raw_string() {
        assert_eq!(tool_type_label(Some("fuzzing")), "fuzzing");
        assert_eq!(tool_type_label(Some("Custom Check")), "Custom Check");
    }

    #[test]
    fn test_absent_or_empty_type_falls_back_to_placeholder() {
        assert_eq!(tool_type_label(None), "Assessment");
        assert_eq!(tool_type_label(Some("")), "Assessment");
        assert_eq!(tool_type_label(Some("   ")), "Assessment");
    }

    proptest! {
        /// The lookup is insensitive to casing and separator choice: mangling
        /// a known key with random case flips and separator swaps never
        /// changes the resolved label.
        #[test]
        fn prop_label_stable_under_case_and_separators(
            idx in 0usize..TOOL_TYPE_LABELS.len(),
            seps in proptest::collection::vec(prop_oneof![Just('-'), Just('_'), Just(' ')], 0..4),
            upper in any::<u32>(),
        ) {
            let (key, label) = TOOL_TYPE_LABELS[idx];
            let mut mangled = String::new();
            for (i, ch) in key.chars().enumerate() {
                let mapped = match ch {
                    '-' | '_' => *seps.get(i % seps.len().max(1)).unwrap_or(&'-'),
                    c if upper & (1 << (i % 32)) != 0 => {
                        c.to_ascii_uppercase()
                    }
                    c => c,
                };
                mangled.push(mapped);
            }
            prop_assert_eq!(tool_type_label(Some(&mangled)), label);
        }
    }
}
