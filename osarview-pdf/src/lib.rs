//! # osarview PDF
//!
//! Paginated A4 PDF export of OSAR (Open Source Assessment Report)
//! documents. Layout and rendering are split: [`osar::build_document`]
//! produces a backend-neutral [`layout::LayoutDocument`], and [`render`]
//! turns it into PDF bytes with printpdf. [`export_osar_pdf`] is the one-call
//! entry point.

pub mod error;
pub mod layout;
pub mod osar;
pub mod render;
pub mod table;

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use osarview_core::config::ExportConfig;
use osarview_core::types::OsarReport;

pub use error::PdfError;
pub use osar::{REPORT_TITLE, build_document};
pub use render::{render_to_bytes, render_to_file};

/// Bundled attestation checkmark, used when no icon override is configured.
pub const DEFAULT_ATTESTATION_ICON: &[u8] = include_bytes!("../assets/checked.png");

/// Resolve the attestation icon bytes for an export.
///
/// A configured override that cannot be read drops the decoration rather
/// than failing the export.
pub fn load_icon(config: &ExportConfig) -> Option<Vec<u8>> {
    match &config.icon_path {
        Some(path) => match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                debug!(path = %path.display(), %error, "attestation icon unreadable, skipping");
                None
            }
        },
        None => Some(DEFAULT_ATTESTATION_ICON.to_vec()),
    }
}

/// Build and write `<out_dir>/<filename>.pdf` for the given report.
///
/// Returns the path of the written file.
pub fn export_osar_pdf(
    report: &OsarReport,
    filename: &str,
    attested: bool,
    config: &ExportConfig,
) -> Result<PathBuf, PdfError> {
    fs::create_dir_all(&config.out_dir).map_err(|source| PdfError::Io {
        path: config.out_dir.clone(),
        source,
    })?;

    let icon = load_icon(config);
    let document = build_document(report, attested, icon.as_deref());
    let path = config.out_dir.join(format!("{filename}.pdf"));
    render_to_file(&document, &path)?;
    info!(path = %path.display(), pages = document.pages.len(), "wrote OSAR PDF");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osarview_core::types::Asset;

    fn report() -> OsarReport {
        OsarReport {
            schema_version: Some("1.0.0".to_string()),
            asset: Asset {
                asset_type: Some("ML-Model".to_string()),
                name: Some("demo".to_string()),
                version: None,
                environment: None,
                url: None,
            },
            assessments: Vec::new(),
        }
    }

    #[test]
    fn test_bundled_icon_decodes_as_png() {
        assert!(DEFAULT_ATTESTATION_ICON.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_load_icon_falls_back_to_bundled() {
        let config = ExportConfig::default();
        assert_eq!(load_icon(&config).as_deref(), Some(DEFAULT_ATTESTATION_ICON));
    }

    #[test]
    fn test_load_icon_skips_unreadable_override() {
        let config = ExportConfig {
            icon_path: Some(PathBuf::from("/nonexistent/icon.png")),
            ..ExportConfig::default()
        };
        assert!(load_icon(&config).is_none());
    }

    #[test]
    fn test_export_writes_named_pdf_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            out_dir: dir.path().join("reports"),
            icon_path: None,
        };
        let path = export_osar_pdf(&report(), "demo-osar", true, &config).unwrap();
        assert_eq!(path, dir.path().join("reports").join("demo-osar.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
