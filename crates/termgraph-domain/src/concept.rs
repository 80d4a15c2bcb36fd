//! Concept module - the nodes of the IS-A hierarchy

use crate::refset::{AssociationEntry, InactivationIndicatorEntry, Member, RefsetMember};
use crate::{CharacteristicType, DefinitionStatus, EffectiveTime, Relationship, SctId};
use std::collections::BTreeSet;

static NO_NEIGHBOURS: BTreeSet<SctId> = BTreeSet::new();

/// Resolution state of a component that may be referenced before it is defined
///
/// A forward reference creates a `Pending` entity; the component's own row
/// moves it to `Resolved`. Anything still pending once a load completes is a
/// dangling reference.
#[derive(Debug, Clone, PartialEq)]
pub enum RowState<T> {
    /// Only referenced so far; no defining row seen
    Pending,

    /// Defining row applied
    Resolved(T),
}

impl<T> RowState<T> {
    /// Whether no defining row has been seen
    pub fn is_pending(&self) -> bool {
        matches!(self, RowState::Pending)
    }

    /// The defining row, if resolved
    pub fn get(&self) -> Option<&T> {
        match self {
            RowState::Pending => None,
            RowState::Resolved(row) => Some(row),
        }
    }

    /// Mutable access to the defining row, if resolved
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            RowState::Pending => None,
            RowState::Resolved(row) => Some(row),
        }
    }
}

/// Fields populated from a concept file row
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptRow {
    /// Publication state
    pub effective_time: EffectiveTime,

    /// Whether the concept is current
    pub active: bool,

    /// Owning module
    pub module_id: SctId,

    /// Primitive or fully defined
    pub definition_status: DefinitionStatus,
}

/// IS-A neighbours of a concept, per characteristic type
///
/// Only stated and inferred hierarchies exist; additional relationships never
/// contribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    stated: BTreeSet<SctId>,
    inferred: BTreeSet<SctId>,
}

impl Adjacency {
    /// Neighbours in the given hierarchy
    pub fn get(&self, characteristic: CharacteristicType) -> &BTreeSet<SctId> {
        match characteristic {
            CharacteristicType::Stated => &self.stated,
            CharacteristicType::Inferred => &self.inferred,
            CharacteristicType::Additional => &NO_NEIGHBOURS,
        }
    }

    /// Add a neighbour; returns whether it was new
    pub fn insert(&mut self, characteristic: CharacteristicType, id: SctId) -> bool {
        match characteristic {
            CharacteristicType::Stated => self.stated.insert(id),
            CharacteristicType::Inferred => self.inferred.insert(id),
            CharacteristicType::Additional => false,
        }
    }

    /// Remove a neighbour; returns whether it was present
    pub fn remove(&mut self, characteristic: CharacteristicType, id: SctId) -> bool {
        match characteristic {
            CharacteristicType::Stated => self.stated.remove(&id),
            CharacteristicType::Inferred => self.inferred.remove(&id),
            CharacteristicType::Additional => false,
        }
    }

    /// Whether neither hierarchy has an entry
    pub fn is_empty(&self) -> bool {
        self.stated.is_empty() && self.inferred.is_empty()
    }
}

/// A concept and everything it owns
///
/// Descriptions are owned by id (their bodies live in the description index);
/// relationships are owned by value, keyed by the concept they originate from.
#[derive(Debug, Clone)]
pub struct Concept {
    /// Concept identifier
    pub id: SctId,

    /// Defining row, or pending if only referenced
    pub row: RowState<ConceptRow>,

    /// Cached term of the active fully specified name
    pub fsn: Option<String>,

    /// Ids of descriptions attached to this concept
    pub descriptions: BTreeSet<SctId>,

    /// Relationships whose source is this concept (every characteristic type)
    pub relationships: Vec<Relationship>,

    /// Inactivation indicator entries referencing this concept
    pub inactivation_indicators: Vec<InactivationIndicatorEntry>,

    /// Historical associations where this concept is the one superseded
    pub associations: Vec<AssociationEntry>,

    /// Memberships of other (simple) reference sets
    pub refset_members: Vec<RefsetMember>,

    /// Parents per characteristic type
    pub parents: Adjacency,

    /// Children per characteristic type
    pub children: Adjacency,

    /// Depth below the root, once the depth pass has run
    pub depth: Option<u32>,
}

impl Concept {
    /// Create a pending concept for a forward reference
    pub fn pending(id: SctId) -> Self {
        Self {
            id,
            row: RowState::Pending,
            fsn: None,
            descriptions: BTreeSet::new(),
            relationships: Vec::new(),
            inactivation_indicators: Vec::new(),
            associations: Vec::new(),
            refset_members: Vec::new(),
            parents: Adjacency::default(),
            children: Adjacency::default(),
            depth: None,
        }
    }

    /// Whether the concept row marks it current; pending concepts are not active
    pub fn is_active(&self) -> bool {
        self.row.get().is_some_and(|row| row.active)
    }

    /// Whether only a forward reference has been seen
    pub fn is_pending(&self) -> bool {
        self.row.is_pending()
    }

    /// Effective time of the defining row
    pub fn effective_time(&self) -> Option<EffectiveTime> {
        self.row.get().map(|row| row.effective_time)
    }

    /// Definition status, once resolved
    pub fn definition_status(&self) -> Option<DefinitionStatus> {
        self.row.get().map(|row| row.definition_status)
    }

    /// Semantic tag: the text inside the final parentheses of the FSN
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_domain::{Concept, SctId};
    ///
    /// let mut concept = Concept::pending(SctId::parse("22298006").unwrap());
    /// concept.fsn = Some("Myocardial infarction (disorder)".to_string());
    /// assert_eq!(concept.semantic_tag(), Some("disorder"));
    /// ```
    pub fn semantic_tag(&self) -> Option<&str> {
        let fsn = self.fsn.as_deref()?.trim_end();
        let body = fsn.strip_suffix(')')?;
        let open = body.rfind('(')?;
        Some(&body[open + 1..])
    }

    /// Parents in the given hierarchy
    pub fn parents(&self, characteristic: CharacteristicType) -> &BTreeSet<SctId> {
        self.parents.get(characteristic)
    }

    /// Children in the given hierarchy
    pub fn children(&self, characteristic: CharacteristicType) -> &BTreeSet<SctId> {
        self.children.get(characteristic)
    }

    /// Relationships of one characteristic type, optionally active only
    pub fn relationships_of(
        &self,
        characteristic: CharacteristicType,
        active_only: bool,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| {
            r.characteristic_type == characteristic && (!active_only || r.active)
        })
    }

    /// The current inactivation indicator, if any
    pub fn inactivation_indicator(&self) -> Option<&InactivationIndicatorEntry> {
        self.inactivation_indicators
            .iter()
            .find(|entry| entry.header().active)
    }

    /// Active historical associations from this concept
    pub fn active_associations(&self) -> impl Iterator<Item = &AssociationEntry> {
        self.associations.iter().filter(|entry| entry.header().active)
    }
}
