//! # osarview Core
//!
//! Core data layer for the osarview assessment toolkit.
//! Provides the assessment report data model, the read-only data-store client,
//! data-shaping utilities, the model comparison workflow, and configuration.

pub mod compare;
pub mod config;
pub mod datastore;
pub mod error;
pub mod routes;
pub mod shape;
pub mod types;

// Re-export commonly used types at the crate root.
pub use compare::{COMPARE_ATTRIBUTES, ComparedModel, MAX_COMPARE};
pub use config::{DataStoreConfig, ExportConfig, OsarviewConfig};
pub use datastore::{HttpDataStore, ReportKind, ReportStore, TestKey};
pub use error::{CompareError, DataStoreError, OsarviewError, Result};
pub use shape::{MitreBuckets, SubstringRule, Verdict, VerdictRule, display_text, tool_type_label};
pub use types::{
    Assessment, AssessmentResult, Asset, Execution, FrrSummary, MitreEntry, ModelRecord,
    OsarReport, ToolInfo,
};
