//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use std::collections::BTreeSet;
use termgraph_domain::SctId;
use termgraph_reconciler::ReconcileReport;
use termgraph_store::{DepthSummary, GraphStats, GraphStore, IntegrityReport, LoadMetrics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a set of concepts with their FSN, status and depth.
    pub fn format_concepts(&self, graph: &GraphStore, ids: &BTreeSet<SctId>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let concepts: Vec<serde_json::Value> = ids
                    .iter()
                    .map(|id| {
                        let concept = graph.concept(*id).ok();
                        serde_json::json!({
                            "id": id.to_string(),
                            "fsn": concept.and_then(|c| c.fsn.clone()),
                            "active": concept.map(|c| c.is_active()),
                            "depth": concept.and_then(|c| c.depth),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&concepts)?)
            }
            OutputFormat::Table => {
                if ids.is_empty() {
                    return Ok(self.colorize("No concepts found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "FSN", "Active", "Depth"]);
                for id in ids {
                    let concept = graph.concept(*id).ok();
                    let fsn = concept.and_then(|c| c.fsn.clone()).unwrap_or_default();
                    let active = match concept {
                        Some(c) if c.is_pending() => "pending".to_string(),
                        Some(c) => c.is_active().to_string(),
                        None => "-".to_string(),
                    };
                    let depth = concept
                        .and_then(|c| c.depth)
                        .map(|d| d.to_string())
                        .unwrap_or_default();
                    builder.push_record([id.to_string(), fsn, active, depth]);
                }
                Ok(self.table(builder))
            }
            OutputFormat::Quiet => Ok(join_ids(ids.iter())),
        }
    }

    /// Format load counters and graph size.
    pub fn format_load(&self, stats: &GraphStats, metrics: &LoadMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: serde_json::Map<String, serde_json::Value> = metrics
                    .rows
                    .iter()
                    .map(|(kind, count)| (kind.to_string(), serde_json::json!(count)))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "graph": {
                        "concepts": stats.concepts,
                        "active_concepts": stats.active_concepts,
                        "descriptions": stats.descriptions,
                        "relationships": stats.relationships,
                        "stated_edges": stats.stated_edges,
                        "inferred_edges": stats.inferred_edges,
                    },
                    "load": {
                        "files_loaded": metrics.files_loaded,
                        "files_skipped": metrics.files_skipped,
                        "rows": rows,
                        "superseded": metrics.superseded,
                        "duplicates": metrics.duplicates,
                        "conflicts_discarded": metrics.conflicts_discarded,
                        "conflicts_removed": metrics.conflicts_removed,
                        "ties": metrics.ties,
                    },
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                let entries = [
                    ("Concepts", stats.concepts),
                    ("Active concepts", stats.active_concepts),
                    ("Descriptions", stats.descriptions),
                    ("Relationships", stats.relationships),
                    ("Stated IS-A edges", stats.stated_edges),
                    ("Inferred IS-A edges", stats.inferred_edges),
                    ("Files loaded", metrics.files_loaded),
                    ("Rows loaded", metrics.total_rows()),
                    ("Superseded rows", metrics.superseded),
                    ("Duplicates", metrics.duplicates),
                    ("Refset ties", metrics.ties),
                ];
                for (name, value) in entries {
                    builder.push_record([name.to_string(), value.to_string()]);
                }
                Ok(self.table(builder))
            }
            OutputFormat::Quiet => Ok(stats.concepts.to_string()),
        }
    }

    /// Format an integrity report.
    pub fn format_integrity(&self, report: &IntegrityReport) -> Result<String> {
        let sections = [
            ("Pending concepts", &report.dangling.concepts),
            ("Pending descriptions", &report.dangling.descriptions),
            ("Descriptions of pending concepts", &report.dangling.orphan_descriptions),
            ("Active concepts without inferred parent", &report.missing_inferred_parent),
            (
                "Fully defined concepts without stated parent",
                &report.fully_defined_without_stated_parent,
            ),
        ];
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "clean": report.is_clean(),
                    "pending_concepts": ids_json(&report.dangling.concepts),
                    "pending_descriptions": ids_json(&report.dangling.descriptions),
                    "orphan_descriptions": ids_json(&report.dangling.orphan_descriptions),
                    "missing_inferred_parent": ids_json(&report.missing_inferred_parent),
                    "fully_defined_without_stated_parent":
                        ids_json(&report.fully_defined_without_stated_parent),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                if report.is_clean() {
                    return Ok(self.success("No integrity problems found"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Check", "Count", "First ids"]);
                for (name, ids) in sections {
                    if ids.is_empty() {
                        continue;
                    }
                    let sample: Vec<String> = ids.iter().take(5).map(|id| id.to_string()).collect();
                    builder.push_record([name.to_string(), ids.len().to_string(), sample.join(", ")]);
                }
                Ok(self.table(builder))
            }
            OutputFormat::Quiet => {
                let all = sections.iter().flat_map(|(_, ids)| ids.iter());
                Ok(join_ids(all))
            }
        }
    }

    /// Format the result of a depth pass and the depths asked for.
    pub fn format_depths(
        &self,
        summary: &DepthSummary,
        depths: &[(SctId, Option<u32>)],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let shown: Vec<serde_json::Value> = depths
                    .iter()
                    .map(|(id, depth)| serde_json::json!({"id": id.to_string(), "depth": depth}))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "visits": summary.visits,
                    "assigned": summary.assigned,
                    "max_depth": summary.max_depth,
                    "concepts": shown,
                }))?)
            }
            OutputFormat::Table => {
                let mut lines = vec![self.info(&format!(
                    "{} concepts given a depth in {} visits, max depth {}",
                    summary.assigned, summary.visits, summary.max_depth
                ))];
                if !depths.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["ID", "Depth"]);
                    for (id, depth) in depths {
                        let depth = depth.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
                        builder.push_record([id.to_string(), depth]);
                    }
                    lines.push(self.table(builder));
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(summary.max_depth.to_string()),
        }
    }

    /// Format a reconciliation report.
    pub fn format_reconcile(&self, report: &ReconcileReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "branch": report.branch,
                "cache_state": report.cache_state.to_string(),
                "outcome": report.outcome().to_string(),
                "cache_path": report.cache_path.display().to_string(),
                "head_timestamp": report.head_timestamp.to_rfc3339(),
                "archive_created": report.archive_created.map(|t| t.to_rfc3339()),
                "previous_release": report.previous_release,
                "files_loaded": report.metrics.files_loaded,
                "rows_loaded": report.metrics.total_rows(),
                "load_secs": report.load_time.as_secs_f64(),
                "elapsed_secs": report.elapsed.as_secs_f64(),
            }))?),
            OutputFormat::Table => Ok(report.summary()),
            OutputFormat::Quiet => Ok(report.outcome().to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a SctId>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join("\n")
}

fn ids_json(ids: &[SctId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
