//! Error types for the CLI application.

use termgraph_domain::IdentifierError;
use termgraph_reconciler::ReconcileError;
use termgraph_store::{GraphError, LoadError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Release loading error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Graph query error
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Reconciliation error
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Malformed concept id on the command line
    #[error("Invalid concept id: {0}")]
    Identifier(#[from] IdentifierError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
