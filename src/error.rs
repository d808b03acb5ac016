//! Error types for menutree
//!
//! Uses `thiserror` for library errors. The tree, menu and selection
//! operations are total and never return these; they surface from the
//! configuration layer, JSON input handling and caller-supplied loaders.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for menutree operations
pub type MenuTreeResult<T> = Result<T, MenuTreeError>;

/// Main error type for menutree operations
#[derive(Error, Debug)]
pub enum MenuTreeError {
    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Input document is not the expected JSON shape
    #[error("invalid input: expected {expected}")]
    InvalidInput { expected: &'static str },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dictionary id with no entry
    #[error("unknown {dictionary} id {id}")]
    UnknownDictionaryId { dictionary: String, id: i64 },

    /// A caller-supplied loader failed
    #[error("failed to load data: {0}")]
    Load(#[source] anyhow::Error),

    /// Parameter verification rejected a refresh
    #[error("table parameters rejected by verifier")]
    VerifyRejected,
}
