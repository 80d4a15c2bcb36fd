//! Trait definitions for equality and external interactions
//!
//! These traits define the boundaries between the graph engine and the
//! services it consumes. Implementations live in other crates.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Value equality over the facts a component states, ignoring its identity
///
/// Two rows with different ids but semantically equal content are duplicates
/// and have to be reconciled.
pub trait SemanticEquals {
    /// Whether both rows state the same fact
    fn semantic_equals(&self, other: &Self) -> bool;
}

/// Rows in `existing` that duplicate `candidate`
pub fn semantic_duplicates<'a, T: SemanticEquals>(
    candidate: &'a T,
    existing: &'a [T],
) -> impl Iterator<Item = &'a T> + 'a {
    existing
        .iter()
        .filter(move |row| !std::ptr::eq(*row, candidate) && row.semantic_equals(candidate))
}

/// Branch state reported by the authoring service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchMetadata {
    /// Last modification of the branch
    pub head_timestamp: DateTime<Utc>,

    /// Release the branch was based on (names the previous release archive)
    pub previous_release: String,
}

/// Trait for fetching branch metadata
///
/// Implemented by the infrastructure layer; the reconciler treats it as opaque.
pub trait BranchMetadataSource {
    /// Error type for metadata operations
    type Error;

    /// Fetch head timestamp and previous release for a branch
    fn fetch_branch_metadata(&self, branch: &str) -> Result<BranchMetadata, Self::Error>;
}

/// Trait for exporting the unpublished changes of a branch
///
/// Implemented by the infrastructure layer; the reconciler treats it as opaque.
pub trait DeltaExporter {
    /// Error type for export operations
    type Error;

    /// Export a delta of everything changed since the previous release,
    /// returning the directory holding the RF2 delta files
    fn export_delta(&self, branch: &str) -> Result<PathBuf, Self::Error>;
}
