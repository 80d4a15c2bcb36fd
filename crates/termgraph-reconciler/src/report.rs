//! What a reconciliation run decided and did

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use termgraph_store::{DepthSummary, LoadMetrics};

/// State of the cached snapshot when the run started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Created at or after the branch head; reused as is
    Fresh,
    /// The branch changed after the cache was created
    Stale,
    /// No cache for this branch yet
    Missing,
}

impl CacheState {
    /// Whether the cache can be loaded instead of regenerated
    pub fn is_reusable(&self) -> bool {
        matches!(self, CacheState::Fresh)
    }
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheState::Fresh => "fresh",
            CacheState::Stale => "stale",
            CacheState::Missing => "missing",
        };
        f.write_str(name)
    }
}

/// How the graph was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Loaded from the cached snapshot
    Reused,
    /// Rebuilt from the previous release plus a delta, and cached
    Regenerated,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reused => f.write_str("reused"),
            Outcome::Regenerated => f.write_str("regenerated"),
        }
    }
}

/// Report of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    /// Branch reconciled
    pub branch: String,

    /// Cache state found on arrival
    pub cache_state: CacheState,

    /// Cache directory used or written
    pub cache_path: PathBuf,

    /// Branch head reported by the metadata source
    pub head_timestamp: DateTime<Utc>,

    /// Creation time of the cache found on arrival
    pub archive_created: Option<DateTime<Utc>>,

    /// Release the branch is based on, when regenerating
    pub previous_release: Option<String>,

    /// Counters from every file loaded
    pub metrics: LoadMetrics,

    /// Depth pass result, when one was configured
    pub depth: Option<DepthSummary>,

    /// Time spent loading files
    pub load_time: Duration,

    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl ReconcileReport {
    /// How the graph was produced
    pub fn outcome(&self) -> Outcome {
        if self.cache_state.is_reusable() {
            Outcome::Reused
        } else {
            Outcome::Regenerated
        }
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Reconcile Summary".to_string(),
            "=================".to_string(),
            format!("Branch: {}", self.branch),
            format!("Cache: {} ({})", self.cache_path.display(), self.cache_state),
            format!("Outcome: {}", self.outcome()),
            format!("Branch head: {}", self.head_timestamp.to_rfc3339()),
        ];
        if let Some(created) = self.archive_created {
            lines.push(format!("Cache created: {}", created.to_rfc3339()));
        }
        if let Some(release) = &self.previous_release {
            lines.push(format!("Previous release: {}", release));
        }
        if let Some(depth) = &self.depth {
            lines.push(format!(
                "Depth pass: {} concepts, max depth {}",
                depth.assigned, depth.max_depth
            ));
        }
        lines.push(format!(
            "Load time: {:.2}s of {:.2}s",
            self.load_time.as_secs_f64(),
            self.elapsed.as_secs_f64()
        ));
        lines.push(String::new());
        lines.push(self.metrics.summary());

        lines.join("\n")
    }
}
