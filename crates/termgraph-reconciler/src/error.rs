//! Error types for reconciliation

use std::io;
use std::path::PathBuf;
use termgraph_store::{GraphError, LoadError};
use thiserror::Error;

/// Errors that can occur while reconciling a cached snapshot
///
/// None of these are retried: a failed metadata fetch or a missing release
/// archive is reported straight to the caller.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Branch metadata could not be fetched
    #[error("Metadata error for branch {branch}: {message}")]
    Metadata {
        /// Branch that was asked about
        branch: String,
        /// Underlying failure
        message: String,
    },

    /// The release the branch is based on is not in the releases directory
    #[error("Previous release not found: {0}")]
    MissingPreviousRelease(PathBuf),

    /// The delta export failed
    #[error("Delta export error for branch {branch}: {message}")]
    DeltaExport {
        /// Branch being exported
        branch: String,
        /// Underlying failure
        message: String,
    },

    /// A release file failed to load
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Graph operation failed after loading
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Filesystem error on the cache or staging directory
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReconcileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for reconciliation
pub type Result<T> = std::result::Result<T, ReconcileError>;
