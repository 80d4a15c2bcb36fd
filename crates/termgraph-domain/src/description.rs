//! Description module - terms attached to concepts

use crate::refset::{AssociationEntry, InactivationIndicatorEntry, LangRefsetEntry, Member};
use crate::{Acceptability, CaseSignificance, DescriptionType, EffectiveTime, RowState, SctId};
use std::collections::BTreeMap;

/// Fields populated from a description (or text definition) file row
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionRow {
    /// Publication state
    pub effective_time: EffectiveTime,

    /// Whether the description is current
    pub active: bool,

    /// Owning module
    pub module_id: SctId,

    /// Two-letter language code
    pub language_code: String,

    /// The term text
    pub term: String,

    /// FSN, synonym or text definition
    pub description_type: DescriptionType,

    /// Case significance of the term
    pub case_significance: CaseSignificance,
}

/// A description and the reference set entries it owns
#[derive(Debug, Clone)]
pub struct Description {
    /// Description identifier
    pub id: SctId,

    /// Owning concept; unknown while the description is only referenced
    pub concept_id: Option<SctId>,

    /// Defining row, or pending if only referenced
    pub row: RowState<DescriptionRow>,

    /// Language refset entries currently recorded for this description
    pub lang_entries: Vec<LangRefsetEntry>,

    /// Current acceptability per dialect (language refset id)
    pub acceptability: BTreeMap<SctId, Acceptability>,

    /// Inactivation indicator entries referencing this description
    pub inactivation_indicators: Vec<InactivationIndicatorEntry>,

    /// Historical associations from this description
    pub associations: Vec<AssociationEntry>,
}

impl Description {
    /// Create a pending description for a forward reference
    pub fn pending(id: SctId) -> Self {
        Self {
            id,
            concept_id: None,
            row: RowState::Pending,
            lang_entries: Vec::new(),
            acceptability: BTreeMap::new(),
            inactivation_indicators: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Whether the description row marks it current
    pub fn is_active(&self) -> bool {
        self.row.get().is_some_and(|row| row.active)
    }

    /// Whether only a forward reference has been seen
    pub fn is_pending(&self) -> bool {
        self.row.is_pending()
    }

    /// Term text, once resolved
    pub fn term(&self) -> Option<&str> {
        self.row.get().map(|row| row.term.as_str())
    }

    /// Description type, once resolved
    pub fn description_type(&self) -> Option<DescriptionType> {
        self.row.get().map(|row| row.description_type)
    }

    /// Effective time of the defining row
    pub fn effective_time(&self) -> Option<EffectiveTime> {
        self.row.get().map(|row| row.effective_time)
    }

    /// Current acceptability in a dialect
    pub fn acceptability_in(&self, lang_refset: SctId) -> Option<Acceptability> {
        self.acceptability.get(&lang_refset).copied()
    }

    /// Whether the description is the preferred term in a dialect
    pub fn is_preferred_in(&self, lang_refset: SctId) -> bool {
        self.acceptability_in(lang_refset) == Some(Acceptability::Preferred)
    }

    /// Lang entries recorded for one dialect
    pub fn lang_entries_for(&self, lang_refset: SctId) -> impl Iterator<Item = &LangRefsetEntry> {
        self.lang_entries
            .iter()
            .filter(move |entry| entry.header().refset_id == lang_refset)
    }

    /// The current inactivation indicator, if any
    pub fn inactivation_indicator(&self) -> Option<&InactivationIndicatorEntry> {
        self.inactivation_indicators
            .iter()
            .find(|entry| entry.header().active)
    }
}
