//! Termgraph Domain Layer
//!
//! This crate contains the entity model for an RF2 terminology release: the
//! components that make up the ontology, the identifiers that name them and
//! the trait interfaces that the store and reconciler layers depend upon.
//!
//! ## Key Concepts
//!
//! - **SctId**: Numeric component identifier with a partition and Verhoeff check digit
//! - **Concept**: A node in the IS-A hierarchy, owning descriptions and relationships
//! - **Description**: A term attached to a concept, with per-dialect acceptability
//! - **Relationship**: A typed, grouped edge (or concrete value) from a source concept
//! - **Refset members**: Language acceptability, inactivation indicators, historical associations
//! - **Effective time**: Publication date of a row; unpublished rows sort after all published ones
//!
//! ## Architecture
//!
//! - Plain data plus invariants, no I/O
//! - Entities are either `Pending` (seen only as a forward reference) or `Resolved`
//! - Trait definitions for the external collaborators of the reconciler

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod concept;
pub mod description;
pub mod effective_time;
pub mod identifier;
pub mod refset;
pub mod relationship;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use concept::{Adjacency, Concept, ConceptRow, RowState};
pub use description::{Description, DescriptionRow};
pub use effective_time::EffectiveTime;
pub use identifier::{ComponentKind, IdentifierError, SctId};
pub use refset::{
    AssociationEntry, InactivationIndicatorEntry, LangRefsetEntry, Member, MemberHeader, MemberId,
    RefsetMember,
};
pub use relationship::{ConcreteValue, Relationship, RelationshipTarget};
pub use traits::{
    semantic_duplicates, BranchMetadata, BranchMetadataSource, DeltaExporter, SemanticEquals,
};
pub use vocabulary::{
    Acceptability, AssociationType, CaseSignificance, CharacteristicType, DefinitionStatus,
    DescriptionType, Modifier,
};
