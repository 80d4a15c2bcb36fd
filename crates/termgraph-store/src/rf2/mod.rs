//! RF2 release files: kinds, columns, loading and writing
//!
//! A release is a set of tab-delimited files, one per component kind. The kind
//! of a file is decided by a substring of its name, never by its content, so a
//! renamed file is not recognised.

pub(crate) mod conflict;
mod loader;
pub(crate) mod rows;
mod writer;

pub use loader::{LoadOptions, ReleaseLoader};
pub use writer::{SnapshotWriter, WriteSummary};

use std::fmt;

/// The kinds of release file the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    /// `sct2_Concept_`
    Concept,
    /// `sct2_Description_`
    Description,
    /// `sct2_TextDefinition_`
    TextDefinition,
    /// `sct2_StatedRelationship_`
    StatedRelationship,
    /// `sct2_Relationship_`
    Relationship,
    /// `sct2_RelationshipConcreteValues_`
    RelationshipConcreteValues,
    /// `der2_cRefset_Language`
    LanguageRefset,
    /// `der2_cRefset_AttributeValue` (inactivation indicators)
    AttributeValueRefset,
    /// `der2_cRefset_Association` (historical associations)
    AssociationRefset,
    /// `der2_Refset_Simple`
    SimpleRefset,
}

const COMPONENT_COLUMNS: [&str; 4] = ["id", "effectiveTime", "active", "moduleId"];
const MEMBER_COLUMNS: [&str; 6] = [
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "refsetId",
    "referencedComponentId",
];

impl FileKind {
    /// Dependency order: every file only references components whose
    /// defining files come earlier.
    pub const LOAD_ORDER: [FileKind; 10] = [
        FileKind::Concept,
        FileKind::Description,
        FileKind::TextDefinition,
        FileKind::StatedRelationship,
        FileKind::Relationship,
        FileKind::RelationshipConcreteValues,
        FileKind::LanguageRefset,
        FileKind::AttributeValueRefset,
        FileKind::AssociationRefset,
        FileKind::SimpleRefset,
    ];

    /// Recognise a file by name
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_store::rf2::FileKind;
    ///
    /// assert_eq!(
    ///     FileKind::detect("sct2_StatedRelationship_Snapshot_INT_20240101.txt"),
    ///     Some(FileKind::StatedRelationship)
    /// );
    /// assert_eq!(FileKind::detect("readme.txt"), None);
    /// ```
    pub fn detect(file_name: &str) -> Option<Self> {
        Self::LOAD_ORDER
            .iter()
            .copied()
            .find(|kind| file_name.contains(kind.name_pattern()))
    }

    /// Substring identifying the kind in a file name
    pub fn name_pattern(&self) -> &'static str {
        match self {
            FileKind::Concept => "sct2_Concept_",
            FileKind::Description => "sct2_Description_",
            FileKind::TextDefinition => "sct2_TextDefinition_",
            FileKind::StatedRelationship => "sct2_StatedRelationship_",
            FileKind::Relationship => "sct2_Relationship_",
            FileKind::RelationshipConcreteValues => "sct2_RelationshipConcreteValues_",
            FileKind::LanguageRefset => "der2_cRefset_Language",
            FileKind::AttributeValueRefset => "der2_cRefset_AttributeValue",
            FileKind::AssociationRefset => "der2_cRefset_Association",
            FileKind::SimpleRefset => "der2_Refset_Simple",
        }
    }

    /// Column names, in file order
    pub fn header(&self) -> Vec<&'static str> {
        let trailing: &[&str] = match self {
            FileKind::Concept => &["definitionStatusId"],
            FileKind::Description | FileKind::TextDefinition => &[
                "conceptId",
                "languageCode",
                "typeId",
                "term",
                "caseSignificanceId",
            ],
            FileKind::StatedRelationship | FileKind::Relationship => &[
                "sourceId",
                "destinationId",
                "relationshipGroup",
                "typeId",
                "characteristicTypeId",
                "modifierId",
            ],
            FileKind::RelationshipConcreteValues => &[
                "sourceId",
                "value",
                "relationshipGroup",
                "typeId",
                "characteristicTypeId",
                "modifierId",
            ],
            FileKind::LanguageRefset => &["acceptabilityId"],
            FileKind::AttributeValueRefset => &["valueId"],
            FileKind::AssociationRefset => &["targetComponentId"],
            FileKind::SimpleRefset => &[],
        };
        let leading: &[&str] = if self.is_refset() {
            &MEMBER_COLUMNS
        } else {
            &COMPONENT_COLUMNS
        };
        leading.iter().chain(trailing).copied().collect()
    }

    /// Whether rows are reference set members (UUID ids)
    pub fn is_refset(&self) -> bool {
        matches!(
            self,
            FileKind::LanguageRefset
                | FileKind::AttributeValueRefset
                | FileKind::AssociationRefset
                | FileKind::SimpleRefset
        )
    }

    /// Whether rows may carry columns beyond the fixed header
    pub(crate) fn allows_extra_columns(&self) -> bool {
        matches!(self, FileKind::SimpleRefset)
    }

    /// Short name for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Concept => "concept",
            FileKind::Description => "description",
            FileKind::TextDefinition => "text-definition",
            FileKind::StatedRelationship => "stated-relationship",
            FileKind::Relationship => "relationship",
            FileKind::RelationshipConcreteValues => "concrete-value",
            FileKind::LanguageRefset => "language",
            FileKind::AttributeValueRefset => "attribute-value",
            FileKind::AssociationRefset => "association",
            FileKind::SimpleRefset => "simple-refset",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which cut of a release a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    /// Every component, current row only
    Snapshot,
    /// Rows changed since the previous release
    Delta,
    /// Every historical row; never loaded
    Full,
}

impl ReleaseType {
    /// Recognise the release type from a file name
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_store::rf2::ReleaseType;
    ///
    /// assert_eq!(
    ///     ReleaseType::detect("der2_cRefset_LanguageDelta-en_INT_20240101.txt"),
    ///     Some(ReleaseType::Delta)
    /// );
    /// ```
    pub fn detect(file_name: &str) -> Option<Self> {
        [ReleaseType::Snapshot, ReleaseType::Delta, ReleaseType::Full]
            .into_iter()
            .find(|release_type| file_name.contains(release_type.as_str()))
    }

    /// Name as it appears in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Snapshot => "Snapshot",
            ReleaseType::Delta => "Delta",
            ReleaseType::Full => "Full",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
