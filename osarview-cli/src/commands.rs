//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, bail};

use osarview_core::compare::{self, COMPARE_ATTRIBUTES};
use osarview_core::config::OsarviewConfig;
use osarview_core::datastore::{HttpDataStore, ReportKind, ReportStore, TestKey};
use osarview_core::shape::{
    MitreBuckets, SubstringRule, frr_summary, test_counts, threat_intel_sources,
};
use osarview_core::types::{MitreEntry, ThreatIntelSummary};

pub async fn run_models(config: &OsarviewConfig, llm_only: bool) -> anyhow::Result<()> {
    let store = HttpDataStore::new(&config.datastore)?;
    let models = store.fetch_models().await.context("fetching model list")?;

    let rows: Vec<Vec<String>> = models
        .iter()
        .filter(|m| !llm_only || m.is_llm())
        .map(|m| {
            vec![
                m.name.clone(),
                m.model_type.clone().unwrap_or_else(|| "-".to_string()),
                m.organization.clone().unwrap_or_else(|| "-".to_string()),
                m.created_date_display(),
            ]
        })
        .collect();

    print_table(&["Name", "Type", "Organization", "Created"], &rows);
    println!("{} model(s)", rows.len());
    Ok(())
}

pub async fn run_probe(config: &OsarviewConfig, model: Option<&str>) -> anyhow::Result<()> {
    let store = HttpDataStore::new(&config.datastore)?;

    match model {
        Some(model) => {
            let (mitre, frr) = tokio::join!(
                store.report_exists(model, TestKey::Mitre, ReportKind::Detailed),
                store.report_exists(model, TestKey::Frr, ReportKind::Summary),
            );
            println!("mitre detailed report: {}", yes_no(mitre));
            println!("frr summary report:    {}", yes_no(frr));
            println!("comparison eligible:   {}", yes_no(mitre && frr));
        }
        None => {
            let models = store.fetch_models().await.context("fetching model list")?;
            let eligible = compare::eligible_models(&store, &models).await;
            for model in &eligible {
                println!("{}", model.name);
            }
            println!("{} eligible model(s)", eligible.len());
        }
    }
    Ok(())
}

pub async fn run_compare(config: &OsarviewConfig, names: &[String]) -> anyhow::Result<()> {
    let store = HttpDataStore::new(&config.datastore)?;
    let models = store.fetch_models().await.context("fetching model list")?;
    let selection = compare::select_by_names(&models, names)?;
    let compared = compare::compare_models(&store, &selection).await?;

    if compared.is_empty() {
        println!("no comparison data available for the selected models");
        return Ok(());
    }

    let mut headers: Vec<&str> = vec!["Attribute"];
    headers.extend(compared.iter().map(|c| c.model.name.as_str()));

    let rows: Vec<Vec<String>> = COMPARE_ATTRIBUTES
        .iter()
        .map(|(key, label)| {
            let mut row = vec![label.to_string()];
            row.extend(compared.iter().map(|c| c.attribute(key)));
            row
        })
        .collect();

    print_table(&headers, &rows);
    Ok(())
}

pub async fn run_summary(config: &OsarviewConfig, model: &str, test: &str) -> anyhow::Result<()> {
    let test = parse_test_key(test)?;
    let store = HttpDataStore::new(&config.datastore)?;

    match test {
        TestKey::Mitre => {
            let payload = store
                .fetch_report(model, TestKey::Mitre, ReportKind::Detailed)
                .await?;
            let entries: Vec<MitreEntry> =
                serde_json::from_value(payload).context("parsing mitre detailed report")?;
            let buckets = MitreBuckets::from_entries(&entries, &SubstringRule);
            println!("extreme:   {}", buckets.extreme);
            println!("potential: {}", buckets.potential);
            println!("non:       {}", buckets.non);
            println!("total:     {}", buckets.total());
        }
        TestKey::Frr => {
            let payload = store
                .fetch_report(model, TestKey::Frr, ReportKind::Summary)
                .await?;
            let frr = frr_summary(&payload);
            println!("accepted:     {}", frr.accept_count);
            println!("refused:      {}", frr.refusal_count);
            println!("refusal rate: {}", frr.refusal_rate);
        }
        TestKey::Instruct | TestKey::Autocomplete => {
            let payload = store.fetch_report(model, test, ReportKind::Summary).await?;
            let counts = test_counts(&payload);
            println!("success: {}", counts.success);
            println!("fail:    {}", counts.fail);
        }
        TestKey::ThreatIntel => {
            let payload = store
                .fetch_report(model, TestKey::ThreatIntel, ReportKind::Summary)
                .await?;
            let summary: ThreatIntelSummary =
                serde_json::from_value(payload).context("parsing threat-intel summary")?;
            let stats = &summary.stat_per_model;
            println!("total score:   {}", stats.total_score);
            println!("average score: {}", stats.avg_score);
            println!("correct:       {}", stats.correct_mc_count);
            println!("incorrect:     {}", stats.incorrect_mc_count);
            let rows: Vec<Vec<String>> = threat_intel_sources(&summary)
                .into_iter()
                .map(|s| vec![s.source, s.total.to_string()])
                .collect();
            if !rows.is_empty() {
                println!();
                print_table(&["Source", "Total"], &rows);
            }
        }
    }
    Ok(())
}

pub async fn run_export(
    config: &OsarviewConfig,
    model: &str,
    input: Option<&Path>,
    out: Option<&Path>,
    attested: bool,
) -> anyhow::Result<()> {
    let report = match input {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            let store = HttpDataStore::new(&config.datastore)?;
            store
                .fetch_osar(model)
                .await
                .with_context(|| format!("fetching OSAR report for {model}"))?
        }
    };

    let mut export = config.export.clone();
    if let Some(dir) = out {
        export.out_dir = dir.to_path_buf();
    }
    let filename = format!("{model}-osar");
    let path = osarview_pdf::export_osar_pdf(&report, &filename, attested, &export)?;
    println!("{}", path.display());
    Ok(())
}

fn parse_test_key(raw: &str) -> anyhow::Result<TestKey> {
    match raw {
        "mitre" => Ok(TestKey::Mitre),
        "frr" => Ok(TestKey::Frr),
        "instruct" => Ok(TestKey::Instruct),
        "autocomplete" => Ok(TestKey::Autocomplete),
        "threat-intel" => Ok(TestKey::ThreatIntel),
        other => bail!(
            "unknown test key '{other}' (expected mitre, frr, instruct, autocomplete or threat-intel)"
        ),
    }
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

/// Print a plain-text table with columns padded to the widest cell.
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    line(headers.to_vec());
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(dashes.iter().map(String::as_str).collect());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_test_key_accepts_all_known_keys() {
        assert_eq!(parse_test_key("mitre").unwrap(), TestKey::Mitre);
        assert_eq!(parse_test_key("frr").unwrap(), TestKey::Frr);
        assert_eq!(parse_test_key("instruct").unwrap(), TestKey::Instruct);
        assert_eq!(
            parse_test_key("autocomplete").unwrap(),
            TestKey::Autocomplete
        );
        assert_eq!(parse_test_key("threat-intel").unwrap(), TestKey::ThreatIntel);
    }

    #[test]
    fn test_parse_test_key_rejects_unknown() {
        assert!(parse_test_key("sast").is_err());
        assert!(parse_test_key("").is_err());
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }
}
