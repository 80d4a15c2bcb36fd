//! Transitive closure over the IS-A adjacency
//!
//! Unlimited closures are memoised per (concept, characteristic type) for the
//! lifetime of a load cycle. Edits made through the store after a closure has
//! been computed are not reflected until [`GraphStore::clear_closure_cache`].

use crate::error::GraphError;
use crate::graph::GraphStore;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use termgraph_domain::{CharacteristicType, SctId};

type Memo = RefCell<HashMap<(SctId, CharacteristicType), Rc<BTreeSet<SctId>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Memoised closures, one table per direction
#[derive(Debug, Default)]
pub(crate) struct ClosureCache {
    ancestors: Memo,
    descendants: Memo,
}

impl ClosureCache {
    fn table(&self, direction: Direction) -> &Memo {
        match direction {
            Direction::Up => &self.ancestors,
            Direction::Down => &self.descendants,
        }
    }

    pub(crate) fn clear(&self) {
        self.ancestors.borrow_mut().clear();
        self.descendants.borrow_mut().clear();
    }

    /// Number of memoised closures
    pub(crate) fn len(&self) -> usize {
        self.ancestors.borrow().len() + self.descendants.borrow().len()
    }
}

impl GraphStore {
    /// Every concept reachable through parent links
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown concept, `CycleDetected` if the hierarchy
    /// loops back on itself.
    pub fn ancestors(
        &self,
        id: SctId,
        characteristic: CharacteristicType,
    ) -> Result<Rc<BTreeSet<SctId>>, GraphError> {
        self.closure_of(id, characteristic, Direction::Up)
    }

    /// Every concept reachable through child links
    ///
    /// With `Some(limit)` the search stops `limit` levels below the immediate
    /// children, so `Some(0)` returns the immediate children only. Bounded
    /// results are not memoised, but the full closure is still computed so a
    /// cycle anywhere below `id` is reported.
    pub fn descendants(
        &self,
        id: SctId,
        characteristic: CharacteristicType,
        depth_limit: Option<u32>,
    ) -> Result<Rc<BTreeSet<SctId>>, GraphError> {
        match depth_limit {
            None => self.closure_of(id, characteristic, Direction::Down),
            Some(limit) => self
                .bounded_descendants(id, characteristic, limit)
                .map(Rc::new),
        }
    }

    /// Whether `ancestor` is reachable from `id` through parent links
    pub fn is_descendant_of(
        &self,
        id: SctId,
        ancestor: SctId,
        characteristic: CharacteristicType,
    ) -> Result<bool, GraphError> {
        Ok(self.ancestors(id, characteristic)?.contains(&ancestor))
    }

    /// Drop every memoised closure
    pub fn clear_closure_cache(&mut self) {
        self.closure.clear();
    }

    /// Number of memoised closures currently held
    pub fn cached_closures(&self) -> usize {
        self.closure.len()
    }

    fn neighbours(
        &self,
        id: SctId,
        characteristic: CharacteristicType,
        direction: Direction,
    ) -> impl Iterator<Item = SctId> + '_ {
        self.concept(id)
            .ok()
            .map(|concept| match direction {
                Direction::Up => concept.parents(characteristic),
                Direction::Down => concept.children(characteristic),
            })
            .into_iter()
            .flatten()
            .copied()
    }

    /// Depth-first post-order walk, memoising every node it finishes
    ///
    /// A node is in progress from the moment it is expanded until all of its
    /// neighbours are finished; meeting an in-progress node is a back edge.
    fn closure_of(
        &self,
        start: SctId,
        characteristic: CharacteristicType,
        direction: Direction,
    ) -> Result<Rc<BTreeSet<SctId>>, GraphError> {
        self.concept(start)?;
        let memo = self.closure.table(direction);
        if let Some(hit) = memo.borrow().get(&(start, characteristic)) {
            return Ok(Rc::clone(hit));
        }

        let mut in_progress = HashSet::new();
        let mut stack = vec![(start, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                let mut closure = BTreeSet::new();
                {
                    let finished = memo.borrow();
                    for next in self.neighbours(node, characteristic, direction) {
                        closure.insert(next);
                        if let Some(below) = finished.get(&(next, characteristic)) {
                            closure.extend(below.iter().copied());
                        }
                    }
                }
                in_progress.remove(&node);
                memo.borrow_mut()
                    .insert((node, characteristic), Rc::new(closure));
                continue;
            }
            if memo.borrow().contains_key(&(node, characteristic)) {
                continue;
            }

            in_progress.insert(node);
            stack.push((node, true));
            for next in self.neighbours(node, characteristic, direction) {
                if in_progress.contains(&next) {
                    return Err(GraphError::CycleDetected {
                        concept: next,
                        characteristic,
                    });
                }
                if !memo.borrow().contains_key(&(next, characteristic)) {
                    stack.push((next, false));
                }
            }
        }

        memo.borrow()
            .get(&(start, characteristic))
            .cloned()
            .ok_or_else(|| GraphError::concept_not_found(start))
    }

    fn bounded_descendants(
        &self,
        start: SctId,
        characteristic: CharacteristicType,
        limit: u32,
    ) -> Result<BTreeSet<SctId>, GraphError> {
        // Level-by-level search can't see a back edge below the start
        self.closure_of(start, characteristic, Direction::Down)?;
        let mut found = BTreeSet::new();
        let mut frontier = vec![start];
        for _ in 0..=limit {
            let mut next_frontier = Vec::new();
            for node in frontier {
                for child in self.neighbours(node, characteristic, Direction::Down) {
                    if found.insert(child) {
                        next_frontier.push(child);
                    }
                }
            }
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::vocabulary::{CORE_MODULE, IS_A};
    use termgraph_domain::{
        ComponentKind, EffectiveTime, Modifier, Relationship, RelationshipTarget,
    };

    fn concept(item: u64) -> SctId {
        SctId::from_parts(item, None, ComponentKind::Concept).unwrap()
    }

    /// Graph with inferred edges `child -> parent` for each pair
    fn graph(edges: &[(u64, u64)]) -> GraphStore {
        let mut graph = GraphStore::new();
        for (n, (child, parent)) in edges.iter().enumerate() {
            graph.apply_relationship(Relationship {
                id: Some(SctId::from_parts(900 + n as u64, None, ComponentKind::Relationship).unwrap()),
                effective_time: EffectiveTime::Unpublished,
                active: true,
                module_id: CORE_MODULE,
                source_id: concept(*child),
                type_id: IS_A,
                target: RelationshipTarget::Concept(concept(*parent)),
                group: 0,
                characteristic_type: CharacteristicType::Inferred,
                modifier: Modifier::Existential,
            });
        }
        graph
    }

    fn set(items: &[u64]) -> BTreeSet<SctId> {
        items.iter().map(|i| concept(*i)).collect()
    }

    #[test]
    fn test_chain_closure() {
        // 100 is a 200 is a 300
        let graph = graph(&[(100, 200), (200, 300)]);
        let ancestors = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert_eq!(*ancestors, set(&[200, 300]));

        let descendants = graph
            .descendants(concept(300), CharacteristicType::Inferred, None)
            .unwrap();
        assert_eq!(*descendants, set(&[100, 200]));
        assert!(graph
            .ancestors(concept(100), CharacteristicType::Stated)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_multiple_inheritance_is_a_union() {
        // Diamond: 100 -> {200, 300} -> 400
        let graph = graph(&[(100, 200), (100, 300), (200, 400), (300, 400)]);
        let ancestors = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert_eq!(*ancestors, set(&[200, 300, 400]));
        let descendants = graph
            .descendants(concept(400), CharacteristicType::Inferred, None)
            .unwrap();
        assert_eq!(*descendants, set(&[100, 200, 300]));
    }

    #[test]
    fn test_depth_limit() {
        let graph = graph(&[(100, 200), (200, 300), (300, 400)]);
        let immediate = graph
            .descendants(concept(400), CharacteristicType::Inferred, Some(0))
            .unwrap();
        assert_eq!(*immediate, set(&[300]));
        let two_levels = graph
            .descendants(concept(400), CharacteristicType::Inferred, Some(1))
            .unwrap();
        assert_eq!(*two_levels, set(&[200, 300]));
    }

    #[test]
    fn test_results_are_memoised() {
        let graph = graph(&[(100, 200), (200, 300)]);
        assert_eq!(graph.cached_closures(), 0);
        let first = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        // Every node on the walk is finished and kept
        assert_eq!(graph.cached_closures(), 3);
        let second = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_survives_edits_until_cleared() {
        let mut graph = graph(&[(100, 200)]);
        let before = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert_eq!(*before, set(&[200]));

        let rel = SctId::from_parts(900, None, ComponentKind::Relationship).unwrap();
        graph
            .set_relationship_active(rel, false, EffectiveTime::Unpublished)
            .unwrap();
        let stale = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert_eq!(*stale, set(&[200]));

        graph.clear_closure_cache();
        let fresh = graph.ancestors(concept(100), CharacteristicType::Inferred).unwrap();
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_cycle_is_reported() {
        let graph = graph(&[(100, 200), (200, 300), (300, 100)]);
        let err = graph
            .ancestors(concept(100), CharacteristicType::Inferred)
            .unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));

        let err = graph
            .descendants(concept(100), CharacteristicType::Inferred, Some(5))
            .unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
    }

    #[test]
    fn test_bounded_search_reports_cycle_below_start() {
        // 200 and 300 are each other's parent, both under 100
        let graph = graph(&[(200, 100), (300, 200), (200, 300)]);
        let err = graph
            .descendants(concept(100), CharacteristicType::Inferred, Some(5))
            .unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));

        let err = graph
            .descendants(concept(100), CharacteristicType::Inferred, Some(0))
            .unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
    }

    #[test]
    fn test_unknown_concept() {
        let graph = GraphStore::new();
        let err = graph
            .ancestors(concept(100), CharacteristicType::Inferred)
            .unwrap_err();
        assert!(matches!(err, GraphError::NotFound { .. }));
    }
}
