//! Data-shaping utilities: pure functions that normalize fetched JSON into
//! display-ready shapes. No I/O lives here, which keeps everything in this
//! module testable without a data store or a rendering backend.

mod classify;
mod labels;
mod summary;
mod values;

pub use classify::{MitreBuckets, SubstringRule, Verdict, VerdictRule};
pub use labels::tool_type_label;
pub use summary::{SourceTotal, TestCounts, frr_summary, test_counts, threat_intel_sources};
pub use values::{display_text, is_url};
