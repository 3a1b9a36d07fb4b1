//! Error types for PDF generation.

use std::path::PathBuf;

/// Errors from document layout and rendering.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("failed to render PDF: {message}")]
    Render { message: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
