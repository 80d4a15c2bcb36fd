//! Graph index over every concept and description of a loaded release
//!
//! The store owns all entities. Rows are applied by the release loader; once a
//! load completes consumers read the graph and make targeted edits through
//! [`GraphStore::set_relationship_active`] and [`GraphStore::add_relationship`],
//! which keep the parent/child adjacency symmetric with the active IS-A
//! relationships.

use crate::closure::ClosureCache;
use crate::error::GraphError;
use crate::rf2::conflict::{self, Resolution};
use crate::rf2::rows::RowKey;
use std::collections::{BTreeSet, HashMap, HashSet};
use termgraph_domain::vocabulary::ROOT_CONCEPT;
use termgraph_domain::{
    semantic_duplicates, AssociationEntry, CharacteristicType, ComponentKind, Concept, ConceptRow,
    DefinitionStatus, Description, DescriptionRow, DescriptionType, EffectiveTime,
    InactivationIndicatorEntry, LangRefsetEntry, Member, MemberId, RefsetMember, Relationship,
    RowState, SctId, SemanticEquals,
};

/// Result of applying a component row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowOutcome {
    /// The row is now the component's current state
    Applied {
        /// Other rows that state the same fact under a different id
        duplicates: usize,
    },

    /// The component already holds a strictly later row
    Superseded {
        /// Effective time of the row kept
        existing: EffectiveTime,
    },
}

/// Components that were referenced but never defined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DanglingReferences {
    /// Concepts still pending
    pub concepts: Vec<SctId>,

    /// Descriptions still pending
    pub descriptions: Vec<SctId>,

    /// Defined descriptions whose owning concept is still pending
    pub orphan_descriptions: Vec<SctId>,
}

impl DanglingReferences {
    /// Whether every reference was resolved
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.descriptions.is_empty() && self.orphan_descriptions.is_empty()
    }

    /// Number of unresolved references
    pub fn len(&self) -> usize {
        self.concepts.len() + self.descriptions.len() + self.orphan_descriptions.len()
    }
}

/// Consistency checks over a loaded graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Unresolved forward references
    pub dangling: DanglingReferences,

    /// Active concepts other than the root with no active inferred parent
    pub missing_inferred_parent: Vec<SctId>,

    /// Fully defined concepts with no active stated parent
    pub fully_defined_without_stated_parent: Vec<SctId>,
}

impl IntegrityReport {
    /// Whether no check found anything
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.missing_inferred_parent.is_empty()
            && self.fully_defined_without_stated_parent.is_empty()
    }
}

/// Size of a loaded graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Concepts in the index, pending ones included
    pub concepts: usize,

    /// Active concepts
    pub active_concepts: usize,

    /// Descriptions in the index, pending ones included
    pub descriptions: usize,

    /// Relationships of every characteristic type
    pub relationships: usize,

    /// Parent links in the stated hierarchy
    pub stated_edges: usize,

    /// Parent links in the inferred hierarchy
    pub inferred_edges: usize,
}

/// The in-memory graph of one release
///
/// There is one store per load cycle; it is not shared between threads (the
/// closure cache uses interior mutability, so the store is `!Sync`).
///
/// # Examples
///
/// ```
/// use termgraph_store::GraphStore;
/// use termgraph_domain::SctId;
///
/// let mut graph = GraphStore::new();
/// let id = SctId::parse("1000004").unwrap();
/// assert!(!graph.contains_concept(id));
///
/// graph.get_or_create_concept(id);
/// assert!(graph.concept(id).unwrap().is_pending());
/// ```
#[derive(Debug, Default)]
pub struct GraphStore {
    concepts: HashMap<SctId, Concept>,
    descriptions: HashMap<SctId, Description>,
    relationship_sources: HashMap<SctId, SctId>,
    association_targets: HashMap<SctId, Vec<AssociationEntry>>,
    published: HashSet<SctId>,
    published_members: HashSet<MemberId>,
    pub(crate) closure: ClosureCache,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a concept
    pub fn concept(&self, id: SctId) -> Result<&Concept, GraphError> {
        self.concepts
            .get(&id)
            .ok_or_else(|| GraphError::concept_not_found(id))
    }

    /// Look up a concept, creating a pending one if it is unknown
    ///
    /// Callers must not edit `relationships` directly; use
    /// [`GraphStore::set_relationship_active`] so the adjacency stays in step.
    pub fn get_or_create_concept(&mut self, id: SctId) -> &mut Concept {
        self.concepts
            .entry(id)
            .or_insert_with(|| Concept::pending(id))
    }

    /// Whether the concept is in the index (pending or resolved)
    pub fn contains_concept(&self, id: SctId) -> bool {
        self.concepts.contains_key(&id)
    }

    /// Look up a description
    pub fn description(&self, id: SctId) -> Result<&Description, GraphError> {
        self.descriptions.get(&id).ok_or(GraphError::NotFound {
            kind: ComponentKind::Description,
            id,
        })
    }

    /// Look up a description, creating a pending one if it is unknown
    pub fn get_or_create_description(&mut self, id: SctId) -> &mut Description {
        self.descriptions
            .entry(id)
            .or_insert_with(|| Description::pending(id))
    }

    /// Whether the description is in the index (pending or resolved)
    pub fn contains_description(&self, id: SctId) -> bool {
        self.descriptions.contains_key(&id)
    }

    /// Whether a component has been defined by its own row
    pub fn is_resolved(&self, kind: ComponentKind, id: SctId) -> bool {
        match kind {
            ComponentKind::Concept => self.concepts.get(&id).is_some_and(|c| !c.is_pending()),
            ComponentKind::Description => self
                .descriptions
                .get(&id)
                .is_some_and(|d| !d.is_pending()),
            ComponentKind::Relationship => self.relationship_sources.contains_key(&id),
        }
    }

    /// Whether a released row has ever been loaded for this component
    ///
    /// Stays true after a later unpublished row replaces the released one.
    pub fn was_published(&self, id: SctId) -> bool {
        self.published.contains(&id)
    }

    /// Whether a released row has ever been loaded for this member
    pub fn was_member_published(&self, id: MemberId) -> bool {
        self.published_members.contains(&id)
    }

    pub(crate) fn mark_published(&mut self, key: RowKey) {
        match key {
            RowKey::Component(id) => self.published.insert(id),
            RowKey::Member(id) => self.published_members.insert(id),
        };
    }

    /// Every concept, in no particular order
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Every description, in no particular order
    pub fn descriptions(&self) -> impl Iterator<Item = &Description> {
        self.descriptions.values()
    }

    /// Number of concepts, pending ones included
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Number of descriptions, pending ones included
    pub fn description_count(&self) -> usize {
        self.descriptions.len()
    }

    /// Descriptions attached to a concept
    pub fn descriptions_of(&self, concept_id: SctId) -> Result<Vec<&Description>, GraphError> {
        let concept = self.concept(concept_id)?;
        Ok(concept
            .descriptions
            .iter()
            .filter_map(|id| self.descriptions.get(id))
            .collect())
    }

    /// Active synonym marked preferred in a dialect
    pub fn preferred_term(&self, concept_id: SctId, lang_refset: SctId) -> Option<&str> {
        let concept = self.concepts.get(&concept_id)?;
        concept
            .descriptions
            .iter()
            .filter_map(|id| self.descriptions.get(id))
            .find(|d| {
                d.is_active()
                    && d.description_type() == Some(DescriptionType::Synonym)
                    && d.is_preferred_in(lang_refset)
            })
            .and_then(|d| d.term())
    }

    /// Immediate parents in one hierarchy
    pub fn parents(
        &self,
        id: SctId,
        characteristic: CharacteristicType,
    ) -> Result<&BTreeSet<SctId>, GraphError> {
        Ok(self.concept(id)?.parents(characteristic))
    }

    /// Immediate children in one hierarchy
    pub fn children(
        &self,
        id: SctId,
        characteristic: CharacteristicType,
    ) -> Result<&BTreeSet<SctId>, GraphError> {
        Ok(self.concept(id)?.children(characteristic))
    }

    /// Look up a relationship by id
    pub fn relationship(&self, id: SctId) -> Result<&Relationship, GraphError> {
        self.relationship_sources
            .get(&id)
            .and_then(|source| self.concepts.get(source))
            .and_then(|concept| concept.relationships.iter().find(|r| r.id == Some(id)))
            .ok_or(GraphError::NotFound {
                kind: ComponentKind::Relationship,
                id,
            })
    }

    /// Historical associations that point at a component
    pub fn associations_targeting(&self, target: SctId) -> &[AssociationEntry] {
        self.association_targets
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Activate or deactivate a relationship, updating both ends of the
    /// adjacency.
    ///
    /// The closure cache is not invalidated; closures computed before the edit
    /// keep their old value until the next load cycle.
    pub fn set_relationship_active(
        &mut self,
        id: SctId,
        active: bool,
        effective_time: EffectiveTime,
    ) -> Result<(), GraphError> {
        let not_found = GraphError::NotFound {
            kind: ComponentKind::Relationship,
            id,
        };
        let source = *self.relationship_sources.get(&id).ok_or(not_found.clone())?;
        let relationship = self
            .concepts
            .get_mut(&source)
            .and_then(|concept| concept.relationships.iter_mut().find(|r| r.id == Some(id)))
            .ok_or(not_found)?;
        relationship.active = active;
        relationship.effective_time = effective_time;
        let edge = hierarchy_edge(relationship);

        if let Some((target, characteristic)) = edge {
            self.refresh_edge(source, target, characteristic);
        }
        Ok(())
    }

    /// Add a relationship authored after the load; both ends must exist
    ///
    /// Returns the number of other relationships stating the same fact.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown end. `Superseded` when the id is already
    /// held with a later effective time; the graph is left unchanged.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<usize, GraphError> {
        self.concept(relationship.source_id)?;
        if let Some(target) = relationship.target_concept() {
            self.concept(target)?;
        }
        let id = relationship.id.unwrap_or(relationship.source_id);
        match self.apply_relationship(relationship) {
            RowOutcome::Applied { duplicates } => Ok(duplicates),
            RowOutcome::Superseded { existing } => Err(GraphError::Superseded { id, existing }),
        }
    }

    /// Concepts and descriptions referenced but never defined
    pub fn dangling_references(&self) -> DanglingReferences {
        let mut concepts: Vec<SctId> = self
            .concepts
            .values()
            .filter(|c| c.is_pending())
            .map(|c| c.id)
            .collect();
        let mut descriptions: Vec<SctId> = self
            .descriptions
            .values()
            .filter(|d| d.is_pending())
            .map(|d| d.id)
            .collect();
        let mut orphan_descriptions: Vec<SctId> = self
            .descriptions
            .values()
            .filter(|d| !d.is_pending())
            .filter(|d| {
                d.concept_id
                    .and_then(|owner| self.concepts.get(&owner))
                    .map_or(true, |owner| owner.is_pending())
            })
            .map(|d| d.id)
            .collect();
        concepts.sort_unstable();
        descriptions.sort_unstable();
        orphan_descriptions.sort_unstable();
        DanglingReferences {
            concepts,
            descriptions,
            orphan_descriptions,
        }
    }

    /// Run every consistency check
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut missing_inferred_parent = Vec::new();
        let mut fully_defined_without_stated_parent = Vec::new();
        for concept in self.concepts.values().filter(|c| c.is_active()) {
            if concept.id != ROOT_CONCEPT
                && concept.parents(CharacteristicType::Inferred).is_empty()
            {
                missing_inferred_parent.push(concept.id);
            }
            if concept.definition_status() == Some(DefinitionStatus::FullyDefined)
                && concept.parents(CharacteristicType::Stated).is_empty()
            {
                fully_defined_without_stated_parent.push(concept.id);
            }
        }
        missing_inferred_parent.sort_unstable();
        fully_defined_without_stated_parent.sort_unstable();
        IntegrityReport {
            dangling: self.dangling_references(),
            missing_inferred_parent,
            fully_defined_without_stated_parent,
        }
    }

    /// Counts of the loaded components
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            concepts: self.concepts.len(),
            descriptions: self.descriptions.len(),
            ..GraphStats::default()
        };
        for concept in self.concepts.values() {
            if concept.is_active() {
                stats.active_concepts += 1;
            }
            stats.relationships += concept.relationships.len();
            stats.stated_edges += concept.parents(CharacteristicType::Stated).len();
            stats.inferred_edges += concept.parents(CharacteristicType::Inferred).len();
        }
        stats
    }

    pub(crate) fn apply_concept(&mut self, id: SctId, row: ConceptRow) -> RowOutcome {
        let concept = self.get_or_create_concept(id);
        if let Some(existing) = concept.effective_time() {
            if existing > row.effective_time {
                return RowOutcome::Superseded { existing };
            }
        }
        concept.row = RowState::Resolved(row);
        RowOutcome::Applied { duplicates: 0 }
    }

    pub(crate) fn apply_description(
        &mut self,
        id: SctId,
        concept_id: SctId,
        row: DescriptionRow,
    ) -> RowOutcome {
        self.get_or_create_concept(concept_id);
        let description = self.get_or_create_description(id);
        if let Some(existing) = description.effective_time() {
            if existing > row.effective_time {
                return RowOutcome::Superseded { existing };
            }
        }
        let previous_owner = description.concept_id.replace(concept_id);
        description.row = RowState::Resolved(row);

        if let Some(previous) = previous_owner.filter(|owner| *owner != concept_id) {
            if let Some(concept) = self.concepts.get_mut(&previous) {
                concept.descriptions.remove(&id);
            }
            self.refresh_fsn(previous);
        }
        self.get_or_create_concept(concept_id).descriptions.insert(id);
        self.refresh_fsn(concept_id);
        RowOutcome::Applied { duplicates: 0 }
    }

    pub(crate) fn apply_relationship(&mut self, relationship: Relationship) -> RowOutcome {
        let source = relationship.source_id;
        if let Some(target) = relationship.target_concept() {
            self.get_or_create_concept(target);
        }
        self.get_or_create_concept(source);

        if let Some(id) = relationship.id {
            if let Some(previous_source) = self.relationship_sources.get(&id).copied() {
                let existing = self
                    .concepts
                    .get(&previous_source)
                    .and_then(|c| c.relationships.iter().find(|r| r.id == Some(id)))
                    .map(|r| r.effective_time);
                if let Some(existing) = existing {
                    if existing > relationship.effective_time {
                        return RowOutcome::Superseded { existing };
                    }
                }
                if let Some(previous) = self.detach_relationship(previous_source, id) {
                    if let Some((target, characteristic)) = hierarchy_edge(&previous) {
                        self.refresh_edge(previous_source, target, characteristic);
                    }
                }
            }
            self.relationship_sources.insert(id, source);
        }

        let edge = hierarchy_edge(&relationship);
        let concept = self.get_or_create_concept(source);
        concept.relationships.push(relationship);
        let duplicates = concept
            .relationships
            .last()
            .map_or(0, |added| {
                semantic_duplicates(added, &concept.relationships).count()
            });

        if let Some((target, characteristic)) = edge {
            self.refresh_edge(source, target, characteristic);
        }
        RowOutcome::Applied { duplicates }
    }

    pub(crate) fn apply_language(&mut self, entry: LangRefsetEntry) -> Resolution {
        let refset = entry.header.refset_id;
        let value = entry.header.active.then_some(entry.acceptability);
        let description = self.get_or_create_description(entry.header.referenced_component_id);
        let resolution = conflict::resolve(&mut description.lang_entries, entry);
        if resolution.is_authoritative() {
            match value {
                Some(acceptability) => {
                    description.acceptability.insert(refset, acceptability);
                }
                None => {
                    description.acceptability.remove(&refset);
                }
            }
        }
        resolution
    }

    /// `None` when the referenced component cannot carry an indicator
    pub(crate) fn apply_indicator(
        &mut self,
        entry: InactivationIndicatorEntry,
    ) -> Option<Resolution> {
        let id = entry.header.referenced_component_id;
        let entries = match id.kind() {
            ComponentKind::Concept => &mut self.get_or_create_concept(id).inactivation_indicators,
            ComponentKind::Description => {
                &mut self.get_or_create_description(id).inactivation_indicators
            }
            ComponentKind::Relationship => return None,
        };
        Some(conflict::resolve(entries, entry))
    }

    /// Returns the number of semantic duplicates, or `None` when the
    /// referenced component cannot carry an association
    pub(crate) fn apply_association(&mut self, entry: AssociationEntry) -> Option<usize> {
        let source = entry.header.referenced_component_id;
        let member = entry.header.id;
        let entries = match source.kind() {
            ComponentKind::Concept => &mut self.get_or_create_concept(source).associations,
            ComponentKind::Description => &mut self.get_or_create_description(source).associations,
            ComponentKind::Relationship => return None,
        };
        let previous = conflict::upsert(entries, entry.clone());
        let duplicates = count_duplicates(entries, member);

        if let Some(previous) = previous {
            if let Some(indexed) = self.association_targets.get_mut(&previous.target_id) {
                indexed.retain(|e| e.header.id != member);
            }
        }
        conflict::upsert(
            self.association_targets.entry(entry.target_id).or_default(),
            entry,
        );
        Some(duplicates)
    }

    /// Returns false when the member does not reference a concept
    pub(crate) fn apply_member(&mut self, member: RefsetMember) -> bool {
        let id = member.header.referenced_component_id;
        if id.kind() != ComponentKind::Concept {
            return false;
        }
        conflict::upsert(&mut self.get_or_create_concept(id).refset_members, member);
        true
    }

    fn detach_relationship(&mut self, source: SctId, id: SctId) -> Option<Relationship> {
        let concept = self.concepts.get_mut(&source)?;
        let index = concept.relationships.iter().position(|r| r.id == Some(id))?;
        Some(concept.relationships.remove(index))
    }

    /// Recompute one adjacency edge from the source's relationships
    ///
    /// The edge exists iff at least one active IS-A relationship with this
    /// (source, target, characteristic type) exists.
    fn refresh_edge(&mut self, source: SctId, target: SctId, characteristic: CharacteristicType) {
        let present = self.concepts.get(&source).is_some_and(|concept| {
            concept.relationships.iter().any(|r| {
                r.active
                    && r.characteristic_type == characteristic
                    && r.is_is_a()
                    && r.target_concept() == Some(target)
            })
        });
        if present {
            self.get_or_create_concept(source)
                .parents
                .insert(characteristic, target);
            self.get_or_create_concept(target)
                .children
                .insert(characteristic, source);
        } else {
            if let Some(concept) = self.concepts.get_mut(&source) {
                concept.parents.remove(characteristic, target);
            }
            if let Some(concept) = self.concepts.get_mut(&target) {
                concept.children.remove(characteristic, source);
            }
        }
    }

    /// Recompute the cached FSN: the active FSN, English preferred
    fn refresh_fsn(&mut self, concept_id: SctId) {
        let fsn = self.concepts.get(&concept_id).and_then(|concept| {
            let candidates: Vec<&Description> = concept
                .descriptions
                .iter()
                .filter_map(|id| self.descriptions.get(id))
                .filter(|d| d.is_active() && d.description_type() == Some(DescriptionType::Fsn))
                .collect();
            candidates
                .iter()
                .find(|d| d.row.get().is_some_and(|row| row.language_code == "en"))
                .or(candidates.first())
                .and_then(|d| d.term())
                .map(str::to_string)
        });
        if let Some(concept) = self.concepts.get_mut(&concept_id) {
            concept.fsn = fsn;
        }
    }
}

fn hierarchy_edge(relationship: &Relationship) -> Option<(SctId, CharacteristicType)> {
    if relationship.feeds_hierarchy() {
        relationship
            .target_concept()
            .map(|target| (target, relationship.characteristic_type))
    } else {
        None
    }
}

fn count_duplicates<T: Member + SemanticEquals>(entries: &[T], member: MemberId) -> usize {
    entries
        .iter()
        .find(|entry| entry.header().id == member)
        .map_or(0, |entry| semantic_duplicates(entry, entries).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::vocabulary::{CORE_MODULE, IS_A};
    use termgraph_domain::{Modifier, RelationshipTarget};

    fn id(s: &str) -> SctId {
        SctId::parse(s).unwrap()
    }

    fn concept_row(active: bool) -> ConceptRow {
        ConceptRow {
            effective_time: EffectiveTime::parse("20200131").unwrap(),
            active,
            module_id: CORE_MODULE,
            definition_status: DefinitionStatus::Primitive,
        }
    }

    fn is_a(rel: &str, source: &str, target: &str, characteristic: CharacteristicType) -> Relationship {
        Relationship {
            id: Some(id(rel)),
            effective_time: EffectiveTime::parse("20200131").unwrap(),
            active: true,
            module_id: CORE_MODULE,
            source_id: id(source),
            type_id: IS_A,
            target: RelationshipTarget::Concept(id(target)),
            group: 0,
            characteristic_type: characteristic,
            modifier: Modifier::Existential,
        }
    }

    #[test]
    fn test_forward_reference_creates_pending_stub() {
        let mut graph = GraphStore::new();
        graph.apply_relationship(is_a("1000027", "1000004", "2000001", CharacteristicType::Stated));

        assert!(graph.concept(id("2000001")).unwrap().is_pending());
        assert_eq!(graph.dangling_references().concepts.len(), 2);

        graph.apply_concept(id("2000001"), concept_row(true));
        graph.apply_concept(id("1000004"), concept_row(true));
        assert!(graph.dangling_references().is_empty());
    }

    #[test]
    fn test_adjacency_follows_activity() {
        let mut graph = GraphStore::new();
        graph.apply_relationship(is_a("1000027", "1000004", "2000001", CharacteristicType::Stated));
        assert!(graph
            .parents(id("1000004"), CharacteristicType::Stated)
            .unwrap()
            .contains(&id("2000001")));
        assert!(graph
            .parents(id("1000004"), CharacteristicType::Inferred)
            .unwrap()
            .is_empty());

        graph
            .set_relationship_active(id("1000027"), false, EffectiveTime::Unpublished)
            .unwrap();
        assert!(graph
            .parents(id("1000004"), CharacteristicType::Stated)
            .unwrap()
            .is_empty());
        assert!(graph
            .children(id("2000001"), CharacteristicType::Stated)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_duplicate_keeps_edge_until_both_inactive() {
        let mut graph = GraphStore::new();
        graph.apply_relationship(is_a("1000027", "1000004", "2000001", CharacteristicType::Inferred));
        let outcome =
            graph.apply_relationship(is_a("2000029", "1000004", "2000001", CharacteristicType::Inferred));
        assert_eq!(outcome, RowOutcome::Applied { duplicates: 1 });

        graph
            .set_relationship_active(id("1000027"), false, EffectiveTime::Unpublished)
            .unwrap();
        assert!(graph
            .children(id("2000001"), CharacteristicType::Inferred)
            .unwrap()
            .contains(&id("1000004")));

        graph
            .set_relationship_active(id("2000029"), false, EffectiveTime::Unpublished)
            .unwrap();
        assert!(graph
            .children(id("2000001"), CharacteristicType::Inferred)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_older_relationship_row_is_superseded() {
        let mut graph = GraphStore::new();
        let mut newer = is_a("1000027", "1000004", "2000001", CharacteristicType::Stated);
        newer.effective_time = EffectiveTime::parse("20210131").unwrap();
        newer.active = false;
        graph.apply_relationship(newer);

        let outcome = graph.apply_relationship(is_a("1000027", "1000004", "2000001", CharacteristicType::Stated));
        assert!(matches!(outcome, RowOutcome::Superseded { .. }));
        assert!(!graph.relationship(id("1000027")).unwrap().active);
        assert!(graph
            .parents(id("1000004"), CharacteristicType::Stated)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_relationship() {
        let mut graph = GraphStore::new();
        let err = graph
            .set_relationship_active(id("1000027"), true, EffectiveTime::Unpublished)
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::NotFound {
                kind: ComponentKind::Relationship,
                id: id("1000027")
            }
        );
    }

    #[test]
    fn test_add_relationship_requires_both_ends() {
        let mut graph = GraphStore::new();
        graph.apply_concept(id("1000004"), concept_row(true));
        let rel = is_a("1000027", "1000004", "2000001", CharacteristicType::Stated);
        assert!(graph.add_relationship(rel.clone()).is_err());

        graph.apply_concept(id("2000001"), concept_row(true));
        graph.add_relationship(rel).unwrap();
        assert_eq!(graph.stats().stated_edges, 1);
    }

    #[test]
    fn test_add_relationship_rejects_older_edit() {
        let mut graph = GraphStore::new();
        graph.apply_concept(id("1000004"), concept_row(true));
        graph.apply_concept(id("2000001"), concept_row(true));
        let mut retired = is_a("1000027", "1000004", "2000001", CharacteristicType::Stated);
        retired.effective_time = EffectiveTime::parse("20210131").unwrap();
        retired.active = false;
        assert_eq!(graph.add_relationship(retired), Ok(0));

        let err = graph
            .add_relationship(is_a("1000027", "1000004", "2000001", CharacteristicType::Stated))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::Superseded {
                id: id("1000027"),
                existing: EffectiveTime::parse("20210131").unwrap(),
            }
        );
        assert!(!graph.relationship(id("1000027")).unwrap().active);
        assert_eq!(graph.stats().stated_edges, 0);
    }

    #[test]
    fn test_integrity_report() {
        let mut graph = GraphStore::new();
        graph.apply_concept(id("1000004"), concept_row(true));
        let mut defined = concept_row(true);
        defined.definition_status = DefinitionStatus::FullyDefined;
        graph.apply_concept(id("2000001"), defined);

        let report = graph.integrity_report();
        assert!(!report.is_clean());
        assert_eq!(report.missing_inferred_parent, vec![id("1000004"), id("2000001")]);
        assert_eq!(report.fully_defined_without_stated_parent, vec![id("2000001")]);
    }
}
