//! Model comparison workflow: eligibility probing and side-by-side data
//! merging.
//!
//! A model is comparable when both of its required benchmark reports (MITRE
//! detailed + FRR summary) exist and are valid JSON. Probes and enrichment
//! fetches for different models fan out concurrently; ordering between them
//! is immaterial because results are merged by model, not arrival order.

use futures::future::join_all;
use tracing::warn;

use crate::datastore::{ReportKind, ReportStore, TestKey};
use crate::error::{CompareError, DataStoreError};
use crate::shape::{self, MitreBuckets, SubstringRule};
use crate::types::{FrrSummary, MitreEntry, ModelRecord};

/// Maximum number of models that may be compared simultaneously.
pub const MAX_COMPARE: usize = 3;

/// Fixed attribute rows of the side-by-side comparison table, as
/// `(key, label)` pairs resolvable via [`ComparedModel::attribute`].
pub const COMPARE_ATTRIBUTES: &[(&str, &str)] = &[
    ("organization", "Organization"),
    ("type", "Type"),
    ("size", "Model Size"),
    ("license", "License"),
    ("access", "Access"),
    ("created_date", "Created Date"),
    ("mitre.extreme", "MITRE - Extremely Malicious"),
    ("mitre.potential", "MITRE - Potentially Malicious"),
    ("mitre.non", "MITRE - other"),
    ("frr.accepted", "FRR - Accepted"),
    ("frr.rejected", "FRR - Refusal Count"),
    ("frr.rate", "FRR - Refusal Rate"),
];

/// A model record enriched with its benchmark summaries for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedModel {
    pub model: ModelRecord,
    pub mitre: MitreBuckets,
    pub frr: FrrSummary,
}

impl ComparedModel {
    /// Resolve a comparison attribute key (plain model field or dotted
    /// `section.field`) to display text, `-` when absent.
    pub fn attribute(&self, key: &str) -> String {
        fn opt(value: &Option<String>) -> String {
            match value.as_deref() {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => "-".to_string(),
            }
        }

        match key {
            "organization" => opt(&self.model.organization),
            "type" => opt(&self.model.model_type),
            "size" => opt(&self.model.size),
            "license" => opt(&self.model.license),
            "access" => opt(&self.model.access),
            "created_date" => self.model.created_date_display(),
            "mitre.extreme" => self.mitre.extreme.to_string(),
            "mitre.potential" => self.mitre.potential.to_string(),
            "mitre.non" => self.mitre.non.to_string(),
            "frr.accepted" => self.frr.accept_count.to_string(),
            "frr.rejected" => self.frr.refusal_count.to_string(),
            "frr.rate" => self.frr.refusal_rate.to_string(),
            _ => "-".to_string(),
        }
    }
}

/// Whether both required benchmark reports exist for a model.
pub async fn has_both_reports<S>(store: &S, model: &str) -> bool
where
    S: ReportStore + ?Sized,
{
    let (mitre, frr) = futures::join!(
        store.report_exists(model, TestKey::Mitre, ReportKind::Detailed),
        store.report_exists(model, TestKey::Frr, ReportKind::Summary),
    );
    mitre && frr
}

/// Determine which LLM models are eligible for comparison.
///
/// All candidates are probed concurrently; a failed or negative check marks
/// that candidate ineligible and is never fatal to the probe as a whole.
pub async fn eligible_models<S>(store: &S, models: &[ModelRecord]) -> Vec<ModelRecord>
where
    S: ReportStore + ?Sized,
{
    let candidates: Vec<&ModelRecord> = models.iter().filter(|m| m.is_llm()).collect();
    let checks = join_all(candidates.iter().map(|m| has_both_reports(store, &m.name))).await;

    candidates
        .into_iter()
        .zip(checks)
        .filter_map(|(model, eligible)| eligible.then(|| model.clone()))
        .collect()
}

/// Fetch and merge benchmark data for up to [`MAX_COMPARE`] selected models.
///
/// Duplicate entries in the selection collapse to one (keyed by `id`, first
/// occurrence wins). Oversized selections are rejected with
/// [`CompareError::TooManySelected`]. Any enrichment fetch/parse failure is
/// logged and the merged result falls back to the empty set.
pub async fn compare_models<S>(
    store: &S,
    selection: &[ModelRecord],
) -> Result<Vec<ComparedModel>, CompareError>
where
    S: ReportStore + ?Sized,
{
    let mut seen = std::collections::HashSet::new();
    let unique: Vec<&ModelRecord> = selection
        .iter()
        .filter(|m| seen.insert(m.id))
        .collect();

    if unique.len() > MAX_COMPARE {
        return Err(CompareError::TooManySelected {
            selected: unique.len(),
            limit: MAX_COMPARE,
        });
    }

    let mut compared = Vec::with_capacity(unique.len());
    for result in join_all(unique.into_iter().map(|m| enrich(store, m))).await {
        match result {
            Ok(model) => compared.push(model),
            Err(err) => {
                warn!(error = %err, "comparison enrichment failed, returning empty set");
                return Ok(Vec::new());
            }
        }
    }
    Ok(compared)
}

/// Resolve selection names against the model list.
pub fn select_by_names(
    models: &[ModelRecord],
    names: &[String],
) -> Result<Vec<ModelRecord>, CompareError> {
    names
        .iter()
        .map(|name| {
            models
                .iter()
                .find(|m| &m.name == name)
                .cloned()
                .ok_or_else(|| CompareError::UnknownModel { name: name.clone() })
        })
        .collect()
}

async fn enrich<S>(store: &S, model: &ModelRecord) -> Result<ComparedModel, DataStoreError>
where
    S: ReportStore + ?Sized,
{
    let (mitre, frr) = futures::join!(
        store.fetch_report(&model.name, TestKey::Mitre, ReportKind::Detailed),
        store.fetch_report(&model.name, TestKey::Frr, ReportKind::Summary),
    );
    let (mitre, frr) = (mitre?, frr?);

    // A well-formed but unexpected payload shapes to zero counts; only
    // transport/JSON failures above abort the merge.
    let entries: Vec<MitreEntry> = serde_json::from_value(mitre).unwrap_or_default();

    Ok(ComparedModel {
        model: model.clone(),
        mitre: MitreBuckets::from_entries(&entries, &SubstringRule),
        frr: shape::frr_summary(&frr),
    })
}
