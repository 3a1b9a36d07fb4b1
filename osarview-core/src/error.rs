//! Error types for the osarview core library.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering the data-store, comparison, and configuration domains.

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, OsarviewError>;

/// Top-level error type for the osarview core library.
#[derive(Debug, thiserror::Error)]
pub enum OsarviewError {
    #[error("data store error: {0}")]
    DataStore(#[from] DataStoreError),

    #[error("comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the report data-store client.
///
/// A missing report is a normal condition for probes and is reported as
/// `false`, never as an error; these variants surface only from explicit
/// fetches where the caller asked for a concrete document.
#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {message}")]
    NotJson { url: String, message: String },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// Errors from the model comparison workflow.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("cannot compare {selected} models at once (limit {limit})")]
    TooManySelected { selected: usize, limit: usize },

    #[error("unknown model: {name}")]
    UnknownModel { name: String },
}
