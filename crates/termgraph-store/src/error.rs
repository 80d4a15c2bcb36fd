//! Error types for graph queries and release loading

use std::path::PathBuf;
use termgraph_domain::{CharacteristicType, ComponentKind, EffectiveTime, SctId};
use thiserror::Error;

/// Errors raised by queries and mutations against a loaded graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No component with this id is in the index
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of component looked up
        kind: ComponentKind,
        /// The missing id
        id: SctId,
    },

    /// A traversal met a back edge; the hierarchy is not a DAG
    #[error("Cycle detected in {} hierarchy at concept {concept}", .characteristic.as_str())]
    CycleDetected {
        /// Concept at which the back edge was found
        concept: SctId,
        /// Hierarchy being traversed
        characteristic: CharacteristicType,
    },

    /// A depth below this concept would not fit in a `u32`
    #[error("Depth overflow below concept {concept}")]
    DepthOverflow {
        /// Concept whose children could not be numbered
        concept: SctId,
    },

    /// An edit carried an older effective time than the row already held
    #[error("{id} already has a later row from {existing}")]
    Superseded {
        /// Component being edited
        id: SctId,
        /// Effective time of the row that was kept
        existing: EffectiveTime,
    },
}

impl GraphError {
    pub(crate) fn concept_not_found(id: SctId) -> Self {
        GraphError::NotFound {
            kind: ComponentKind::Concept,
            id,
        }
    }
}

/// A structural problem in one row of a release file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}:{line}: {message}")]
pub struct ParseError {
    /// Name of the file being parsed
    pub file: String,

    /// 1-based line number (the header is line 1)
    pub line: usize,

    /// What was wrong with the row
    pub message: String,
}

/// Errors that abort the load of a release file
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file or directory could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A row failed structural validation; nothing from the file was applied
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A row referenced a component that was required to exist already
    #[error("{file}:{line}: {kind} {id} has not been loaded")]
    MissingReference {
        /// Name of the file being parsed
        file: String,
        /// 1-based line number
        line: usize,
        /// Kind of component referenced
        kind: ComponentKind,
        /// The unknown id
        id: SctId,
    },

    /// The file name does not identify a supported file kind
    #[error("Unrecognised release file: {0}")]
    UnknownFile(String),

    /// A release directory held no files of the requested type
    #[error("No {release_type} files found in {path}")]
    NoReleaseFiles {
        /// Directory searched
        path: PathBuf,
        /// Release type requested
        release_type: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for load operations
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_location() {
        let err = ParseError {
            file: "sct2_Concept_Delta_INT.txt".to_string(),
            line: 3,
            message: "expected 5 columns, found 4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sct2_Concept_Delta_INT.txt:3: expected 5 columns, found 4"
        );
    }

    #[test]
    fn test_cycle_message_names_hierarchy() {
        let err = GraphError::CycleDetected {
            concept: SctId::parse("1000004").unwrap(),
            characteristic: CharacteristicType::Inferred,
        };
        assert_eq!(
            err.to_string(),
            "Cycle detected in inferred hierarchy at concept 1000004"
        );
    }
}
