//! Deep-link formatting for dashboard navigation.
//!
//! Format only — no routing engine or server-side contract is implied.

use crate::datastore::TestKey;

/// Route pattern consumed by the dashboard router.
pub const BENCHMARK_REPORT_PATTERN: &str = "/:section/llm_benchmark_report/:testKey/:modelName";

/// Concrete deep link to a benchmark report view.
pub fn benchmark_report_link(section: &str, test: TestKey, model_name: &str) -> String {
    format!(
        "/{}/llm_benchmark_report/{}/{}",
        section.trim_matches('/'),
        test.as_str(),
        urlencoding::encode(model_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_report_link() {
        assert_eq!(
            benchmark_report_link("models", TestKey::Mitre, "llama-3"),
            "/models/llm_benchmark_report/mitre/llama-3"
        );
    }

    #[test]
    fn test_link_encodes_model_name_and_trims_section() {
        assert_eq!(
            benchmark_report_link("/models/", TestKey::Frr, "model one"),
            "/models/llm_benchmark_report/frr/model%20one"
        );
    }
}
