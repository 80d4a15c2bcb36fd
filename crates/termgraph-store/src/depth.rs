//! Hierarchy depth pass over the inferred IS-A hierarchy

use crate::error::GraphError;
use crate::graph::GraphStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use termgraph_domain::{CharacteristicType, SctId};
use tracing::debug;

/// How a concept reached by several paths gets its depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthPolicy {
    /// Every visit overwrites the depth; the last path walked decides.
    /// Under multiple inheritance the result depends on traversal order.
    #[default]
    LastWriteWins,

    /// Keep the shortest path from the root; a concept is only revisited
    /// when a shorter path reaches it
    Minimum,
}

/// What a depth pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthSummary {
    /// Concept visits, repeated visits included
    pub visits: usize,

    /// Distinct concepts given a depth
    pub assigned: usize,

    /// Largest depth assigned
    pub max_depth: u32,
}

impl GraphStore {
    /// Assign `depth = starting_depth` to `root` and one more to each inferred
    /// child, recursively
    ///
    /// Children are walked in ascending id order. Concepts not below `root`
    /// keep whatever depth they had.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown root. `CycleDetected` when a path grows
    /// longer than the number of concepts, which only a cycle can cause.
    /// `DepthOverflow` when a depth would pass `u32::MAX`.
    pub fn populate_depth(
        &mut self,
        root: SctId,
        starting_depth: u32,
        policy: DepthPolicy,
    ) -> Result<DepthSummary, GraphError> {
        self.concept(root)?;
        let limit = self.concept_count() as u64;
        let mut assigned: HashMap<SctId, u32> = HashMap::new();
        let mut visits = 0;
        let mut stack = vec![(root, starting_depth)];

        while let Some((id, depth)) = stack.pop() {
            if u64::from(depth - starting_depth) > limit {
                return Err(GraphError::CycleDetected {
                    concept: id,
                    characteristic: CharacteristicType::Inferred,
                });
            }
            if policy == DepthPolicy::Minimum && assigned.get(&id).is_some_and(|d| *d <= depth) {
                continue;
            }
            visits += 1;
            assigned.insert(id, depth);

            let concept = self.get_or_create_concept(id);
            concept.depth = Some(depth);
            let children = concept.children(CharacteristicType::Inferred);
            if children.is_empty() {
                continue;
            }
            let child_depth = depth
                .checked_add(1)
                .ok_or(GraphError::DepthOverflow { concept: id })?;
            // Reversed so the smallest id is popped first
            stack.extend(children.iter().rev().map(|child| (*child, child_depth)));
        }

        let summary = DepthSummary {
            visits,
            assigned: assigned.len(),
            max_depth: assigned.values().copied().max().unwrap_or(starting_depth),
        };
        debug!(
            root = %root,
            visits = summary.visits,
            assigned = summary.assigned,
            "Depth pass complete"
        );
        Ok(summary)
    }
}
