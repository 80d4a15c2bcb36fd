//! Reconciliation of competing reference set members
//!
//! Several members with different ids may describe the same fact (one
//! description in one dialect, one component in one indicator refset) at
//! different points in time. Exactly one of them is kept: the latest.

use termgraph_domain::{EffectiveTime, Member, MemberHeader};

/// What happened to an incoming member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// A member with the same id was overwritten
    Replaced,

    /// The member became authoritative, displacing `removed` older competitors
    Accepted {
        /// Competing entries dropped from the set
        removed: usize,
        /// A competitor had the same effective time; the newcomer won arbitrarily
        tie: bool,
    },

    /// A competitor is strictly later; the member was dropped
    Discarded {
        /// Effective time of the later competitor
        later: EffectiveTime,
    },
}

impl Resolution {
    /// Whether the incoming member now determines the current value
    pub(crate) fn is_authoritative(&self) -> bool {
        !matches!(self, Resolution::Discarded { .. })
    }
}

fn competes(a: &MemberHeader, b: &MemberHeader) -> bool {
    a.refset_id == b.refset_id && a.referenced_component_id == b.referenced_component_id
}

/// Apply the latest-wins rule for `incoming` against `entries`
///
/// Entries compete when they share refset and referenced component. A member
/// with the same id is always overwritten in place. Otherwise the newcomer is
/// dropped if any competitor is strictly later, and replaces every competitor
/// if not. Unpublished rows count as later than any published one.
pub(crate) fn resolve<T: Member>(entries: &mut Vec<T>, incoming: T) -> Resolution {
    let id = incoming.header().id;
    if let Some(existing) = entries.iter_mut().find(|entry| entry.header().id == id) {
        *existing = incoming;
        return Resolution::Replaced;
    }

    let header = incoming.header();
    let mut tie = false;
    for entry in entries.iter().filter(|e| competes(e.header(), header)) {
        let existing = entry.header().effective_time;
        if existing > header.effective_time {
            return Resolution::Discarded { later: existing };
        }
        tie |= existing == header.effective_time;
    }

    let before = entries.len();
    entries.retain(|entry| !competes(entry.header(), header));
    let removed = before - entries.len();
    entries.push(incoming);
    Resolution::Accepted { removed, tie }
}

/// Overwrite a member with the same id, or add it; competitors are kept
pub(crate) fn upsert<T: Member>(entries: &mut Vec<T>, incoming: T) -> Option<T> {
    let id = incoming.header().id;
    match entries.iter_mut().find(|entry| entry.header().id == id) {
        Some(existing) => Some(std::mem::replace(existing, incoming)),
        None => {
            entries.push(incoming);
            None
        }
    }
}
