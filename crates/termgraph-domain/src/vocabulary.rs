//! Vocabulary module - well-known concept ids and the enums decoded from them

use crate::SctId;

/// Root of the IS-A hierarchy
pub const ROOT_CONCEPT: SctId = SctId::known(138875005);
/// IS-A relationship type
pub const IS_A: SctId = SctId::known(116680003);

/// Core module
pub const CORE_MODULE: SctId = SctId::known(900000000000207008);
/// Model component module
pub const MODEL_MODULE: SctId = SctId::known(900000000000012004);

/// Primitive definition status
pub const PRIMITIVE: SctId = SctId::known(900000000000074008);
/// Fully defined (sufficiently defined) definition status
pub const FULLY_DEFINED: SctId = SctId::known(900000000000073002);

/// Fully specified name description type
pub const FSN: SctId = SctId::known(900000000000003001);
/// Synonym description type
pub const SYNONYM: SctId = SctId::known(900000000000013009);
/// Text definition description type
pub const TEXT_DEFINITION: SctId = SctId::known(900000000000550004);

/// Entire term case sensitive
pub const ENTIRE_TERM_CASE_SENSITIVE: SctId = SctId::known(900000000000017005);
/// Entire term case insensitive
pub const CASE_INSENSITIVE: SctId = SctId::known(900000000000448009);
/// Only initial character case insensitive
pub const INITIAL_CHARACTER_CASE_INSENSITIVE: SctId = SctId::known(900000000000020002);

/// Stated characteristic type
pub const STATED_RELATIONSHIP: SctId = SctId::known(900000000000010007);
/// Inferred characteristic type
pub const INFERRED_RELATIONSHIP: SctId = SctId::known(900000000000011006);
/// Additional characteristic type
pub const ADDITIONAL_RELATIONSHIP: SctId = SctId::known(900000000000227009);

/// Existential restriction modifier
pub const EXISTENTIAL: SctId = SctId::known(900000000000451002);
/// Universal restriction modifier
pub const UNIVERSAL: SctId = SctId::known(900000000000450001);

/// Preferred acceptability
pub const PREFERRED: SctId = SctId::known(900000000000548007);
/// Acceptable acceptability
pub const ACCEPTABLE: SctId = SctId::known(900000000000549004);

/// US English language reference set
pub const US_ENGLISH_LANG_REFSET: SctId = SctId::known(900000000000509007);
/// GB English language reference set
pub const GB_ENGLISH_LANG_REFSET: SctId = SctId::known(900000000000508004);

/// Concept inactivation indicator reference set
pub const CONCEPT_INACTIVATION_REFSET: SctId = SctId::known(900000000000489007);
/// Description inactivation indicator reference set
pub const DESCRIPTION_INACTIVATION_REFSET: SctId = SctId::known(900000000000490003);

/// Inactivation reason: duplicate component
pub const REASON_DUPLICATE: SctId = SctId::known(900000000000482003);
/// Inactivation reason: outdated component
pub const REASON_OUTDATED: SctId = SctId::known(900000000000483008);
/// Inactivation reason: ambiguous component
pub const REASON_AMBIGUOUS: SctId = SctId::known(900000000000484002);
/// Inactivation reason: erroneous component
pub const REASON_ERRONEOUS: SctId = SctId::known(900000000000485001);
/// Inactivation reason: component moved elsewhere
pub const REASON_MOVED_ELSEWHERE: SctId = SctId::known(900000000000487009);
/// Inactivation reason: concept non-current (used on descriptions)
pub const REASON_CONCEPT_NON_CURRENT: SctId = SctId::known(900000000000495008);

/// Definition status of a concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionStatus {
    /// Necessary conditions only
    Primitive,
    /// Necessary and sufficient conditions
    FullyDefined,
}

impl DefinitionStatus {
    /// Decode from a definitionStatusId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            PRIMITIVE => Some(DefinitionStatus::Primitive),
            FULLY_DEFINED => Some(DefinitionStatus::FullyDefined),
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            DefinitionStatus::Primitive => PRIMITIVE,
            DefinitionStatus::FullyDefined => FULLY_DEFINED,
        }
    }
}

/// Type of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptionType {
    /// Fully specified name, unique per language
    Fsn,
    /// Synonym
    Synonym,
    /// Text definition
    TextDefinition,
}

impl DescriptionType {
    /// Decode from a typeId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            FSN => Some(DescriptionType::Fsn),
            SYNONYM => Some(DescriptionType::Synonym),
            TEXT_DEFINITION => Some(DescriptionType::TextDefinition),
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            DescriptionType::Fsn => FSN,
            DescriptionType::Synonym => SYNONYM,
            DescriptionType::TextDefinition => TEXT_DEFINITION,
        }
    }
}

/// Case significance of a description term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSignificance {
    /// The whole term is case sensitive
    EntireTermCaseSensitive,
    /// The term may be changed to any case
    CaseInsensitive,
    /// Only the first character may change case
    InitialCharacterCaseInsensitive,
}

impl CaseSignificance {
    /// Decode from a caseSignificanceId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            ENTIRE_TERM_CASE_SENSITIVE => Some(CaseSignificance::EntireTermCaseSensitive),
            CASE_INSENSITIVE => Some(CaseSignificance::CaseInsensitive),
            INITIAL_CHARACTER_CASE_INSENSITIVE => {
                Some(CaseSignificance::InitialCharacterCaseInsensitive)
            }
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            CaseSignificance::EntireTermCaseSensitive => ENTIRE_TERM_CASE_SENSITIVE,
            CaseSignificance::CaseInsensitive => CASE_INSENSITIVE,
            CaseSignificance::InitialCharacterCaseInsensitive => INITIAL_CHARACTER_CASE_INSENSITIVE,
        }
    }
}

/// Whether a relationship was asserted by an author or derived by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacteristicType {
    /// Authored (stated) relationship
    Stated,
    /// Classifier output (inferred) relationship
    Inferred,
    /// Additional, non-defining relationship
    Additional,
}

impl CharacteristicType {
    /// Decode from a characteristicTypeId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            STATED_RELATIONSHIP => Some(CharacteristicType::Stated),
            INFERRED_RELATIONSHIP => Some(CharacteristicType::Inferred),
            ADDITIONAL_RELATIONSHIP => Some(CharacteristicType::Additional),
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            CharacteristicType::Stated => STATED_RELATIONSHIP,
            CharacteristicType::Inferred => INFERRED_RELATIONSHIP,
            CharacteristicType::Additional => ADDITIONAL_RELATIONSHIP,
        }
    }

    /// Whether IS-A rows of this type feed the parent/child adjacency
    pub fn has_hierarchy(&self) -> bool {
        !matches!(self, CharacteristicType::Additional)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacteristicType::Stated => "stated",
            CharacteristicType::Inferred => "inferred",
            CharacteristicType::Additional => "additional",
        }
    }
}

/// Relationship modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// "Some" restriction
    Existential,
    /// "All" restriction
    Universal,
}

impl Modifier {
    /// Decode from a modifierId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            EXISTENTIAL => Some(Modifier::Existential),
            UNIVERSAL => Some(Modifier::Universal),
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            Modifier::Existential => EXISTENTIAL,
            Modifier::Universal => UNIVERSAL,
        }
    }
}

/// Acceptability of a description in a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acceptability {
    /// The preferred term for the dialect
    Preferred,
    /// An acceptable synonym in the dialect
    Acceptable,
}

impl Acceptability {
    /// Decode from an acceptabilityId column
    pub fn from_sctid(id: SctId) -> Option<Self> {
        match id {
            PREFERRED => Some(Acceptability::Preferred),
            ACCEPTABLE => Some(Acceptability::Acceptable),
            _ => None,
        }
    }

    /// Concept id written back to a release file
    pub fn sctid(&self) -> SctId {
        match self {
            Acceptability::Preferred => PREFERRED,
            Acceptability::Acceptable => ACCEPTABLE,
        }
    }
}

/// Historical association reference sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationType {
    /// SAME AS
    SameAs,
    /// REPLACED BY
    ReplacedBy,
    /// POSSIBLY EQUIVALENT TO
    PossiblyEquivalentTo,
    /// POSSIBLY REPLACED BY
    PossiblyReplacedBy,
    /// PARTIALLY EQUIVALENT TO
    PartiallyEquivalentTo,
    /// WAS A
    WasA,
    /// ALTERNATIVE
    Alternative,
    /// MOVED TO
    MovedTo,
    /// MOVED FROM
    MovedFrom,
    /// REFERS TO concept (description associations)
    RefersTo,
}

impl AssociationType {
    /// Every historical association, in release order
    pub const ALL: [AssociationType; 10] = [
        AssociationType::SameAs,
        AssociationType::ReplacedBy,
        AssociationType::PossiblyEquivalentTo,
        AssociationType::PossiblyReplacedBy,
        AssociationType::PartiallyEquivalentTo,
        AssociationType::WasA,
        AssociationType::Alternative,
        AssociationType::MovedTo,
        AssociationType::MovedFrom,
        AssociationType::RefersTo,
    ];

    /// Decode from a refsetId column; `None` for non-historical refsets
    pub fn from_refset(id: SctId) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.refset() == id)
    }

    /// Reference set id of this association
    pub fn refset(&self) -> SctId {
        match self {
            AssociationType::SameAs => SctId::known(900000000000527005),
            AssociationType::ReplacedBy => SctId::known(900000000000526001),
            AssociationType::PossiblyEquivalentTo => SctId::known(900000000000523009),
            AssociationType::PossiblyReplacedBy => SctId::known(1186921001),
            AssociationType::PartiallyEquivalentTo => SctId::known(1186924009),
            AssociationType::WasA => SctId::known(900000000000528000),
            AssociationType::Alternative => SctId::known(900000000000530003),
            AssociationType::MovedTo => SctId::known(900000000000524003),
            AssociationType::MovedFrom => SctId::known(900000000000525002),
            AssociationType::RefersTo => SctId::known(900000000000531004),
        }
    }
}
