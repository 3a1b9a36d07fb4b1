//! Read-only client for the static assessment data store.
//!
//! Reports live at predictable URLs keyed by model name and test key:
//! `<base>/<name>/llm-benchmark/<name>-<testKey>-<reportKind>.json`.
//! Absence of a report is a normal, expected condition — probes answer
//! `false` and log at debug level instead of erroring.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::DataStoreConfig;
use crate::error::DataStoreError;
use crate::types::{ModelRecord, OsarReport};

/// Benchmark test keys understood by the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKey {
    Mitre,
    Frr,
    Instruct,
    Autocomplete,
    ThreatIntel,
}

impl TestKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKey::Mitre => "mitre",
            TestKey::Frr => "frr",
            TestKey::Instruct => "instruct",
            TestKey::Autocomplete => "autocomplete",
            TestKey::ThreatIntel => "threat-intel",
        }
    }
}

/// Report flavors published per test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Detailed,
    Summary,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Detailed => "test-detailed-report",
            ReportKind::Summary => "test-summary-report",
        }
    }
}

/// Abstraction over the report data source.
///
/// The comparison workflow is written against this trait so its semantics are
/// testable with an in-memory store; [`HttpDataStore`] is the production
/// implementation.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Fetch and parse a benchmark report.
    async fn fetch_report(
        &self,
        model: &str,
        test: TestKey,
        kind: ReportKind,
    ) -> Result<Value, DataStoreError>;

    /// Whether a benchmark report exists and is valid JSON. Never errors.
    async fn report_exists(&self, model: &str, test: TestKey, kind: ReportKind) -> bool;
}

/// HTTP-backed data store client.
#[derive(Debug, Clone)]
pub struct HttpDataStore {
    http: reqwest::Client,
    base_url: String,
    models_url: String,
}

impl HttpDataStore {
    pub fn new(config: &DataStoreConfig) -> Result<Self, DataStoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("osarview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataStoreError::Client {
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.assessment_base_url.trim_end_matches('/').to_string(),
            models_url: config.models_url.clone(),
        })
    }

    /// Deterministic URL of a benchmark report.
    pub fn report_url(&self, model: &str, test: TestKey, kind: ReportKind) -> String {
        let name = urlencoding::encode(model);
        format!(
            "{}/{}/llm-benchmark/{}-{}-{}.json",
            self.base_url,
            name,
            name,
            test.as_str(),
            kind.as_str()
        )
    }

    /// Deterministic URL of a model's OSAR document.
    pub fn osar_url(&self, model: &str) -> String {
        let name = urlencoding::encode(model);
        format!("{}/{}/osar/{}-osar.json", self.base_url, name, name)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DataStoreError> {
        let response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|e| DataStoreError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataStoreError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| DataStoreError::NotJson {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch the model metadata list.
    pub async fn fetch_models(&self) -> Result<Vec<ModelRecord>, DataStoreError> {
        self.get_json(&self.models_url).await
    }

    /// Fetch a model's OSAR document.
    pub async fn fetch_osar(&self, model: &str) -> Result<OsarReport, DataStoreError> {
        self.get_json(&self.osar_url(model)).await
    }
}

#[async_trait]
impl ReportStore for HttpDataStore {
    async fn fetch_report(
        &self,
        model: &str,
        test: TestKey,
        kind: ReportKind,
    ) -> Result<Value, DataStoreError> {
        let url = self.report_url(model, test, kind);
        self.get_json(&url).await
    }

    /// Try a lightweight HEAD first; fall back to a full GET-and-parse when
    /// HEAD is unavailable or inconclusive (some hosts block HEAD, and a
    /// successful GET can still be an HTML error page rather than JSON).
    async fn report_exists(&self, model: &str, test: TestKey, kind: ReportKind) -> bool {
        let url = self.report_url(model, test, kind);

        match self.http.head(&url).send().await {
            Ok(response) if response.status().is_success() => return true,
            Ok(response) => {
                debug!(%url, status = %response.status(), "HEAD probe inconclusive");
            }
            Err(err) => {
                debug!(%url, error = %err, "HEAD probe failed");
            }
        }

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                response.json::<Value>().await.is_ok()
            }
            Ok(response) => {
                debug!(%url, status = %response.status(), "report not available");
                false
            }
            Err(err) => {
                debug!(%url, error = %err, "report probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`ReportStore`] used across this crate's tests.

    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct MemoryStore {
        bodies: HashMap<String, String>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        fn key(model: &str, test: TestKey, kind: ReportKind) -> String {
            format!("{model}/{}-{}", test.as_str(), kind.as_str())
        }

        /// Register a raw report body; intentionally accepts invalid JSON so
        /// tests can model HTML error pages and truncated documents.
        pub fn insert(&mut self, model: &str, test: TestKey, kind: ReportKind, body: &str) {
            self.bodies
                .insert(Self::key(model, test, kind), body.to_string());
        }
    }

    #[async_trait]
    impl ReportStore for MemoryStore {
        async fn fetch_report(
            &self,
            model: &str,
            test: TestKey,
            kind: ReportKind,
        ) -> Result<Value, DataStoreError> {
            let key = Self::key(model, test, kind);
            let body = self.bodies.get(&key).ok_or_else(|| DataStoreError::Status {
                url: key.clone(),
                status: 404,
            })?;
            serde_json::from_str(body).map_err(|e| DataStoreError::NotJson {
                url: key,
                message: e.to_string(),
            })
        }

        async fn report_exists(&self, model: &str, test: TestKey, kind: ReportKind) -> bool {
            self.fetch_report(model, test, kind).await.is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataStoreConfig;
    use pretty_assertions::assert_eq;

    fn store() -> HttpDataStore {
        let config = DataStoreConfig {
            assessment_base_url: "https://data.example.org/models/".to_string(),
            ..Default::default()
        };
        HttpDataStore::new(&config).unwrap()
    }

    #[test]
    fn test_report_url_shape() {
        let url = store().report_url("llama-3", TestKey::Mitre, ReportKind::Detailed);
        assert_eq!(
            url,
            "https://data.example.org/models/llama-3/llm-benchmark/llama-3-mitre-test-detailed-report.json"
        );
    }

    #[test]
    fn test_report_url_encodes_model_name() {
        let url = store().report_url("model one/v2", TestKey::Frr, ReportKind::Summary);
        assert_eq!(
            url,
            "https://data.example.org/models/model%20one%2Fv2/llm-benchmark/model%20one%2Fv2-frr-test-summary-report.json"
        );
    }

    #[test]
    fn test_osar_url_shape() {
        assert_eq!(
            store().osar_url("bert"),
            "https://data.example.org/models/bert/osar/bert-osar.json"
        );
    }

    #[test]
    fn test_key_and_kind_spellings() {
        assert_eq!(TestKey::ThreatIntel.as_str(), "threat-intel");
        assert_eq!(TestKey::Autocomplete.as_str(), "autocomplete");
        assert_eq!(ReportKind::Detailed.as_str(), "test-detailed-report");
        assert_eq!(ReportKind::Summary.as_str(), "test-summary-report");
    }

    #[tokio::test]
    async fn test_memory_store_rejects_invalid_json() {
        let mut mem = testing::MemoryStore::new();
        mem.insert(
            "m",
            TestKey::Mitre,
            ReportKind::Detailed,
            "<html>not found</html>",
        );
        assert!(!mem.report_exists("m", TestKey::Mitre, ReportKind::Detailed).await);
        assert!(
            mem.fetch_report("m", TestKey::Mitre, ReportKind::Detailed)
                .await
                .is_err()
        );
    }
}
