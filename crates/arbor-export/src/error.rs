//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting a tree.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the output failed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// The output file or its parent directory could not be created.
    #[error("Cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("Failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
