//! Reference set members attached to concepts and descriptions

use crate::traits::SemanticEquals;
use crate::{Acceptability, AssociationType, EffectiveTime, SctId};

/// Reference set members are identified by UUID, not SCTID
pub type MemberId = uuid::Uuid;

/// Columns shared by every reference set file
#[derive(Debug, Clone, PartialEq)]
pub struct MemberHeader {
    /// Member identifier
    pub id: MemberId,

    /// Publication state
    pub effective_time: EffectiveTime,

    /// Whether the member is current
    pub active: bool,

    /// Owning module
    pub module_id: SctId,

    /// Reference set the row belongs to
    pub refset_id: SctId,

    /// Component the row annotates
    pub referenced_component_id: SctId,
}

/// Access to the shared header, so conflict resolution can be written once
pub trait Member {
    /// The shared columns
    fn header(&self) -> &MemberHeader;
}

/// Language refset entry: acceptability of a description in one dialect
#[derive(Debug, Clone, PartialEq)]
pub struct LangRefsetEntry {
    /// Shared columns; the referenced component is a description
    pub header: MemberHeader,

    /// Preferred or acceptable
    pub acceptability: Acceptability,
}

/// Inactivation indicator entry: why a concept or description was retired
#[derive(Debug, Clone, PartialEq)]
pub struct InactivationIndicatorEntry {
    /// Shared columns
    pub header: MemberHeader,

    /// Inactivation reason concept
    pub reason_id: SctId,
}

/// Historical association: the referenced component is superseded by `target_id`
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationEntry {
    /// Shared columns; the referenced component is the superseded one
    pub header: MemberHeader,

    /// Component that the superseded one points to
    pub target_id: SctId,
}

impl AssociationEntry {
    /// Association kind decoded from the refset id
    pub fn association_type(&self) -> Option<AssociationType> {
        AssociationType::from_refset(self.header.refset_id)
    }
}

/// A member of any other reference set, additional columns kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct RefsetMember {
    /// Shared columns
    pub header: MemberHeader,

    /// Refset-specific trailing columns
    pub additional_fields: Vec<String>,
}

impl Member for LangRefsetEntry {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
}

impl Member for InactivationIndicatorEntry {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
}

impl Member for AssociationEntry {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
}

impl Member for RefsetMember {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
}

fn same_fact(a: &MemberHeader, b: &MemberHeader) -> bool {
    a.refset_id == b.refset_id
        && a.referenced_component_id == b.referenced_component_id
        && a.active == b.active
}

impl SemanticEquals for LangRefsetEntry {
    fn semantic_equals(&self, other: &Self) -> bool {
        same_fact(&self.header, &other.header) && self.acceptability == other.acceptability
    }
}

impl SemanticEquals for InactivationIndicatorEntry {
    fn semantic_equals(&self, other: &Self) -> bool {
        same_fact(&self.header, &other.header) && self.reason_id == other.reason_id
    }
}

impl SemanticEquals for AssociationEntry {
    fn semantic_equals(&self, other: &Self) -> bool {
        same_fact(&self.header, &other.header) && self.target_id == other.target_id
    }
}

impl SemanticEquals for RefsetMember {
    fn semantic_equals(&self, other: &Self) -> bool {
        same_fact(&self.header, &other.header) && self.additional_fields == other.additional_fields
    }
}
