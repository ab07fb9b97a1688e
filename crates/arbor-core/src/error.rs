//! Error types for tree building.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that stop a tree from being built.
///
/// Only root resolution fails this way; problems below the root are reported
/// as [`ScanWarning`]s on the finished tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path not found.
    #[error("Directory not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for the root.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Listing was refused.
    PermissionDenied,
    /// Listing failed for another reason.
    ReadError,
}

/// A directory whose contents could not be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Full path of the directory.
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Subdirectories of `path` could not be listed.
    pub fn directory_skipped(path: impl Into<String>, kind: WarningKind) -> Self {
        let path = path.into();
        Self {
            message: format!("Skipping {path} ({}).", kind.reason()),
            path,
            kind,
        }
    }

    /// Files in `path` could not be listed.
    pub fn files_skipped(path: impl Into<String>, kind: WarningKind) -> Self {
        let path = path.into();
        Self {
            message: format!("Skipping files in {path} ({}).", kind.reason()),
            path,
            kind,
        }
    }
}

impl WarningKind {
    fn reason(self) -> &'static str {
        match self {
            WarningKind::PermissionDenied => "access denied",
            WarningKind::ReadError => "read error",
        }
    }

    /// Classify an I/O error.
    pub fn from_io(error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            _ => WarningKind::ReadError,
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
