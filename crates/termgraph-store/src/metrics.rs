//! Metrics collected while loading release files

use crate::rf2::FileKind;
use std::collections::BTreeMap;

/// Counters for one or more loaded files
///
/// Tracks rows applied per file kind plus every row that was superseded,
/// discarded or flagged during conflict resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMetrics {
    /// Files applied
    pub files_loaded: usize,

    /// Files skipped because they belong to a Full release
    pub files_skipped: usize,

    /// Rows applied per file kind
    pub rows: BTreeMap<FileKind, usize>,

    /// Component rows ignored because a later row was already applied
    pub superseded: usize,

    /// Relationship or association rows stating a fact another id already states
    pub duplicates: usize,

    /// Refset members dropped because a competitor is later
    pub conflicts_discarded: usize,

    /// Older competing refset members removed by a newer one
    pub conflicts_removed: usize,

    /// Competing refset members with equal effective times
    pub ties: usize,

    /// Rows whose referenced component kind cannot carry them
    pub unroutable: usize,
}

impl LoadMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an applied row
    pub fn record_row(&mut self, kind: FileKind) {
        *self.rows.entry(kind).or_insert(0) += 1;
    }

    /// Record a completed file
    pub fn record_file(&mut self) {
        self.files_loaded += 1;
    }

    /// Total rows applied across all kinds
    pub fn total_rows(&self) -> usize {
        self.rows.values().sum()
    }

    /// Fold another set of counters into this one
    pub fn merge(&mut self, other: &LoadMetrics) {
        self.files_loaded += other.files_loaded;
        self.files_skipped += other.files_skipped;
        for (kind, count) in &other.rows {
            *self.rows.entry(*kind).or_insert(0) += count;
        }
        self.superseded += other.superseded;
        self.duplicates += other.duplicates;
        self.conflicts_discarded += other.conflicts_discarded;
        self.conflicts_removed += other.conflicts_removed;
        self.ties += other.ties;
        self.unroutable += other.unroutable;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Load Metrics Summary".to_string(),
            "====================".to_string(),
            format!("Files loaded: {}", self.files_loaded),
        ];
        if self.files_skipped > 0 {
            lines.push(format!("Files skipped (Full release): {}", self.files_skipped));
        }
        lines.push(String::new());

        if !self.rows.is_empty() {
            lines.push("Rows by file kind:".to_string());
            for (kind, count) in &self.rows {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_rows()));
            lines.push(String::new());
        }

        lines.push(format!("Superseded rows: {}", self.superseded));
        lines.push(format!("Duplicates: {}", self.duplicates));
        lines.push(format!(
            "Refset conflicts: {} discarded, {} removed, {} ties",
            self.conflicts_discarded, self.conflicts_removed, self.ties
        ));
        if self.unroutable > 0 {
            lines.push(format!("Unroutable rows: {}", self.unroutable));
        }

        lines.join("\n")
    }
}
