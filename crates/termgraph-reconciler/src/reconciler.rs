//! Snapshot reconciliation: reuse a cached snapshot or rebuild it
//!
//! A cached snapshot is stale when its branch changed after the cache was
//! created. A stale or missing cache is rebuilt by loading the release the
//! branch is based on, then a fresh delta export of the branch on top, and
//! writing the result back as the new cache.

use crate::config::ReconcilerConfig;
use crate::error::{ReconcileError, Result};
use crate::report::{CacheState, ReconcileReport};
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use termgraph_domain::vocabulary::ROOT_CONCEPT;
use termgraph_domain::{BranchMetadata, BranchMetadataSource, DeltaExporter};
use termgraph_store::rf2::{LoadOptions, ReleaseLoader, ReleaseType, SnapshotWriter};
use termgraph_store::{GraphStore, LoadError, LoadMetrics};
use tracing::{info, warn};

/// Whether a cache created at `archive_created` is out of date for a branch
/// last modified at `head`
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use termgraph_reconciler::is_stale;
///
/// let created = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// assert!(is_stale(created, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
/// assert!(!is_stale(created, created));
/// ```
pub fn is_stale(archive_created: DateTime<Utc>, head: DateTime<Utc>) -> bool {
    head > archive_created
}

/// Filesystem creation time of a cache, or its modification time on
/// platforms that do not record creation
pub fn archive_created(path: &Path) -> io::Result<DateTime<Utc>> {
    let metadata = fs::metadata(path)?;
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// The graph produced by a run, with its report
#[derive(Debug)]
pub struct Reconciliation {
    /// Loaded graph, ready for consumers
    pub graph: GraphStore,

    /// What was decided and done
    pub report: ReconcileReport,
}

/// Decides between a cached snapshot and a rebuild, and produces the graph
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use termgraph_reconciler::{
///     FileBranchMetadata, Reconciler, ReconcilerConfig, StagedDeltaExporter,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ReconcilerConfig::from_file(Path::new("reconciler.toml"))?;
/// let reconciler = Reconciler::new(
///     config,
///     FileBranchMetadata::new("branches.json"),
///     StagedDeltaExporter::new("exports"),
/// );
/// let run = reconciler.reconcile("MAIN/PROJ")?;
/// println!("{}", run.report.summary());
/// # Ok(())
/// # }
/// ```
pub struct Reconciler<M, D> {
    config: ReconcilerConfig,
    metadata: M,
    exporter: D,
}

impl<M, D> Reconciler<M, D>
where
    M: BranchMetadataSource,
    M::Error: Display,
    D: DeltaExporter,
    D::Error: Display,
{
    /// Create a reconciler over the given collaborators
    pub fn new(config: ReconcilerConfig, metadata: M, exporter: D) -> Self {
        Self {
            config,
            metadata,
            exporter,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Fetch branch metadata and report the state of its cache, without
    /// loading anything
    pub fn check(&self, branch: &str) -> Result<(CacheState, BranchMetadata)> {
        let metadata = self.fetch_metadata(branch)?;
        let (state, _) = inspect_cache(&self.config.cache_path(branch), metadata.head_timestamp)?;
        Ok((state, metadata))
    }

    /// Produce the current graph of a branch
    ///
    /// # Errors
    ///
    /// Fails without retrying when metadata cannot be fetched, the previous
    /// release is missing, the delta export fails, or any file fails to load.
    pub fn reconcile(&self, branch: &str) -> Result<Reconciliation> {
        let started = Instant::now();
        let metadata = self.fetch_metadata(branch)?;
        let cache_path = self.config.cache_path(branch);
        let (cache_state, created) = inspect_cache(&cache_path, metadata.head_timestamp)?;
        info!(
            branch,
            cache = %cache_path.display(),
            state = %cache_state,
            head = %metadata.head_timestamp.to_rfc3339(),
            "Checked cached snapshot"
        );

        let mut graph = GraphStore::new();
        let (metrics, load_time, previous_release) = if cache_state.is_reusable() {
            let load_started = Instant::now();
            let mut loader = ReleaseLoader::with_options(&mut graph, self.load_options());
            loader.load_directory(&cache_path, ReleaseType::Snapshot)?;
            (loader.into_metrics(), load_started.elapsed(), None)
        } else {
            let (metrics, load_time) = self.regenerate(branch, &metadata, &cache_path, &mut graph)?;
            (metrics, load_time, Some(metadata.previous_release.clone()))
        };

        let depth = match self.config.depth_policy {
            Some(policy) if graph.contains_concept(ROOT_CONCEPT) => {
                Some(graph.populate_depth(ROOT_CONCEPT, 0, policy)?)
            }
            Some(_) => {
                warn!(branch, "Root concept not loaded, skipping depth pass");
                None
            }
            None => None,
        };

        let report = ReconcileReport {
            branch: branch.to_string(),
            cache_state,
            cache_path,
            head_timestamp: metadata.head_timestamp,
            archive_created: created,
            previous_release,
            metrics,
            depth,
            load_time,
            elapsed: started.elapsed(),
        };
        info!(branch, outcome = %report.outcome(), "Reconciled branch");
        Ok(Reconciliation { graph, report })
    }

    fn fetch_metadata(&self, branch: &str) -> Result<BranchMetadata> {
        self.metadata
            .fetch_branch_metadata(branch)
            .map_err(|e| ReconcileError::Metadata {
                branch: branch.to_string(),
                message: e.to_string(),
            })
    }

    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            require_existing: self.config.require_existing,
        }
    }

    /// Previous release as Snapshot, then the branch delta, then a new cache
    fn regenerate(
        &self,
        branch: &str,
        metadata: &BranchMetadata,
        cache_path: &Path,
        graph: &mut GraphStore,
    ) -> Result<(LoadMetrics, Duration)> {
        let previous = self.config.release_path(&metadata.previous_release);
        if !previous.is_dir() {
            return Err(ReconcileError::MissingPreviousRelease(previous));
        }
        let delta = self
            .exporter
            .export_delta(branch)
            .map_err(|e| ReconcileError::DeltaExport {
                branch: branch.to_string(),
                message: e.to_string(),
            })?;
        info!(
            branch,
            previous = %previous.display(),
            delta = %delta.display(),
            "Regenerating cached snapshot"
        );

        let load_started = Instant::now();
        let mut loader = ReleaseLoader::with_options(graph, self.load_options());
        loader.load_directory(&previous, ReleaseType::Snapshot)?;
        match loader.load_directory(&delta, ReleaseType::Delta) {
            Ok(_) => {}
            Err(LoadError::NoReleaseFiles { .. }) => {
                info!(branch, "Delta export holds no changes");
            }
            Err(e) => return Err(e.into()),
        }
        let metrics = loader.into_metrics();
        let load_time = load_started.elapsed();

        self.replace_cache(graph, cache_path)?;
        Ok((metrics, load_time))
    }

    /// Write into a sibling staging directory, then swap it in
    fn replace_cache(&self, graph: &GraphStore, cache_path: &Path) -> Result<()> {
        let staging = staging_path(cache_path);
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| ReconcileError::io(&staging, e))?;
        }
        let label = format!("{}_{}", self.config.project, self.config.environment);
        let summary = SnapshotWriter::new(label)
            .write(graph, &staging)
            .map_err(|e| ReconcileError::io(&staging, e))?;

        if cache_path.exists() {
            fs::remove_dir_all(cache_path).map_err(|e| ReconcileError::io(cache_path, e))?;
        }
        fs::rename(&staging, cache_path).map_err(|e| ReconcileError::io(cache_path, e))?;
        info!(
            cache = %cache_path.display(),
            rows = summary.total_rows(),
            omitted = summary.omitted,
            "Replaced cached snapshot"
        );
        Ok(())
    }
}

fn inspect_cache(
    cache_path: &Path,
    head: DateTime<Utc>,
) -> Result<(CacheState, Option<DateTime<Utc>>)> {
    if !cache_path.is_dir() {
        return Ok((CacheState::Missing, None));
    }
    let created = archive_created(cache_path).map_err(|e| ReconcileError::io(cache_path, e))?;
    let state = if is_stale(created, head) {
        CacheState::Stale
    } else {
        CacheState::Fresh
    };
    Ok((state, Some(created)))
}

fn staging_path(cache_path: &Path) -> PathBuf {
    let name = cache_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    cache_path.with_file_name(format!("{}.staging", name))
}
