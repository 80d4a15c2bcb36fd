//! Integration tests for termgraph-reconciler
//!
//! Each test lays out a releases directory, staged delta exports and a branch
//! manifest in a temporary directory.

use chrono::{TimeZone, Utc};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use termgraph_domain::vocabulary::{
    CORE_MODULE, EXISTENTIAL, INFERRED_RELATIONSHIP, IS_A, PRIMITIVE, ROOT_CONCEPT,
};
use termgraph_domain::{CharacteristicType, ComponentKind, SctId};
use termgraph_reconciler::{
    CacheState, FileBranchMetadata, Outcome, ReconcileError, Reconciler, ReconcilerConfig,
    StagedDeltaExporter,
};
use termgraph_store::rf2::FileKind;
use termgraph_store::DepthPolicy;

const BRANCH: &str = "MAIN/PROJ";

fn concept(item: u64) -> SctId {
    SctId::from_parts(item, None, ComponentKind::Concept).unwrap()
}

fn relationship(item: u64) -> SctId {
    SctId::from_parts(item + 1000, None, ComponentKind::Relationship).unwrap()
}

fn concept_row(id: SctId, time: &str) -> String {
    concept_row_with_state(id, time, true)
}

fn concept_row_with_state(id: SctId, time: &str, active: bool) -> String {
    let flag = if active { 1 } else { 0 };
    format!("{}\t{}\t{}\t{}\t{}", id, time, flag, CORE_MODULE, PRIMITIVE)
}

fn is_a_row(id: SctId, time: &str, source: SctId, target: SctId) -> String {
    format!(
        "{}\t{}\t1\t{}\t{}\t{}\t0\t{}\t{}\t{}",
        id, time, CORE_MODULE, source, target, IS_A, INFERRED_RELATIONSHIP, EXISTENTIAL
    )
}

fn write_file(dir: &Path, name: &str, kind: FileKind, rows: &[String]) {
    fs::create_dir_all(dir).unwrap();
    let mut body = kind.header().join("\t");
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(dir.join(name), body).unwrap();
}

struct Layout {
    _tmp: TempDir,
    root: PathBuf,
}

impl Layout {
    /// Release INT_20240101 holds the root, 100 and 200 (100 under 200 under
    /// root). The branch delta adds 300 under 200.
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let release = root.join("releases/INT_20240101");
        write_file(
            &release,
            "sct2_Concept_Snapshot_INT_20240101.txt",
            FileKind::Concept,
            &[
                concept_row(ROOT_CONCEPT, "20020131"),
                concept_row(concept(100), "20240101"),
                concept_row(concept(200), "20240101"),
            ],
        );
        write_file(
            &release,
            "sct2_Relationship_Snapshot_INT_20240101.txt",
            FileKind::Relationship,
            &[
                is_a_row(relationship(1), "20240101", concept(100), concept(200)),
                is_a_row(relationship(2), "20240101", concept(200), ROOT_CONCEPT),
            ],
        );

        let delta = root.join("exports/MAIN_PROJ");
        write_file(
            &delta,
            "sct2_Concept_Delta_INT.txt",
            FileKind::Concept,
            &[concept_row(concept(300), "")],
        );
        write_file(
            &delta,
            "sct2_Relationship_Delta_INT.txt",
            FileKind::Relationship,
            &[is_a_row(relationship(3), "", concept(300), concept(200))],
        );

        let layout = Self { _tmp: tmp, root };
        layout.set_head("2000-01-01T00:00:00Z", "INT_20240101");
        layout
    }

    fn set_head(&self, head: &str, previous: &str) {
        let manifest = format!(
            r#"{{"{}": {{"headTimestamp": "{}", "previousReleaseIdentifier": "{}"}}}}"#,
            BRANCH, head, previous
        );
        fs::write(self.root.join("branches.json"), manifest).unwrap();
    }

    fn config(&self) -> ReconcilerConfig {
        ReconcilerConfig {
            cache_root: self.root.join("cache"),
            releases_dir: self.root.join("releases"),
            project: "SNOMEDCT".to_string(),
            environment: "dev".to_string(),
            depth_policy: Some(DepthPolicy::LastWriteWins),
            require_existing: false,
        }
    }

    fn reconciler(&self) -> Reconciler<FileBranchMetadata, StagedDeltaExporter> {
        Reconciler::new(
            self.config(),
            FileBranchMetadata::new(self.root.join("branches.json")),
            StagedDeltaExporter::new(self.root.join("exports")),
        )
    }
}

fn children_of_200(graph: &termgraph_store::GraphStore) -> BTreeSet<SctId> {
    graph
        .children(concept(200), CharacteristicType::Inferred)
        .unwrap()
        .clone()
}

#[test]
fn test_missing_cache_is_regenerated() {
    let layout = Layout::new();
    let run = layout.reconciler().reconcile(BRANCH).unwrap();

    assert_eq!(run.report.cache_state, CacheState::Missing);
    assert_eq!(run.report.outcome(), Outcome::Regenerated);
    assert_eq!(run.report.previous_release.as_deref(), Some("INT_20240101"));
    assert_eq!(run.report.metrics.files_loaded, 4);
    assert_eq!(
        children_of_200(&run.graph),
        BTreeSet::from([concept(100), concept(300)])
    );

    let cache = layout.root.join("cache/SNOMEDCT_MAIN_PROJ_dev");
    assert!(cache.join("sct2_Concept_Snapshot_SNOMEDCT_dev.txt").is_file());
    assert!(!layout.root.join("cache/SNOMEDCT_MAIN_PROJ_dev.staging").exists());

    let depth = run.report.depth.unwrap();
    assert_eq!(depth.max_depth, 2);
    assert_eq!(run.graph.concept(concept(300)).unwrap().depth, Some(2));
}

#[test]
fn test_fresh_cache_is_reused() {
    let layout = Layout::new();
    let reconciler = layout.reconciler();
    let first = reconciler.reconcile(BRANCH).unwrap();

    let second = reconciler.reconcile(BRANCH).unwrap();
    assert_eq!(second.report.cache_state, CacheState::Fresh);
    assert_eq!(second.report.outcome(), Outcome::Reused);
    assert!(second.report.previous_release.is_none());
    assert!(second.report.archive_created.is_some());
    assert_eq!(second.graph.stats(), first.graph.stats());
    assert_eq!(children_of_200(&second.graph), children_of_200(&first.graph));
}

#[test]
fn test_branch_change_after_cache_forces_regeneration() {
    let layout = Layout::new();
    let reconciler = layout.reconciler();
    reconciler.reconcile(BRANCH).unwrap();

    layout.set_head("2999-01-01T00:00:00Z", "INT_20240101");
    let (state, metadata) = reconciler.check(BRANCH).unwrap();
    assert_eq!(state, CacheState::Stale);
    assert_eq!(
        metadata.head_timestamp,
        Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap()
    );

    let run = reconciler.reconcile(BRANCH).unwrap();
    assert_eq!(run.report.outcome(), Outcome::Regenerated);
    assert_eq!(run.report.cache_state, CacheState::Stale);
}

#[test]
fn test_missing_previous_release_is_fatal() {
    let layout = Layout::new();
    layout.set_head("2000-01-01T00:00:00Z", "INT_20230101");
    let err = layout.reconciler().reconcile(BRANCH).unwrap_err();
    match err {
        ReconcileError::MissingPreviousRelease(path) => {
            assert!(path.ends_with("INT_20230101"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!layout.root.join("cache").exists());
}

#[test]
fn test_metadata_failure_is_fatal() {
    let layout = Layout::new();
    let err = layout.reconciler().reconcile("MAIN/UNKNOWN").unwrap_err();
    assert!(matches!(err, ReconcileError::Metadata { ref branch, .. } if branch == "MAIN/UNKNOWN"));
}

#[test]
fn test_delta_inactivation_survives_cache_reuse() {
    let layout = Layout::new();
    write_file(
        &layout.root.join("exports/MAIN_PROJ"),
        "sct2_Concept_Delta_INT.txt",
        FileKind::Concept,
        &[
            concept_row(concept(300), ""),
            concept_row_with_state(concept(100), "", false),
        ],
    );
    let reconciler = layout.reconciler();

    let regenerated = reconciler.reconcile(BRANCH).unwrap();
    assert_eq!(regenerated.report.outcome(), Outcome::Regenerated);
    let reused = reconciler.reconcile(BRANCH).unwrap();
    assert_eq!(reused.report.outcome(), Outcome::Reused);

    for graph in [&regenerated.graph, &reused.graph] {
        let retired = graph.concept(concept(100)).unwrap();
        assert!(!retired.is_pending());
        assert!(!retired.is_active());
        assert!(graph.dangling_references().is_empty());
    }
    assert_eq!(reused.graph.stats(), regenerated.graph.stats());
}

#[test]
fn test_empty_delta_export() {
    let layout = Layout::new();
    fs::remove_dir_all(layout.root.join("exports/MAIN_PROJ")).unwrap();
    fs::create_dir_all(layout.root.join("exports")).unwrap();

    let run = layout.reconciler().reconcile(BRANCH).unwrap();
    assert_eq!(run.report.outcome(), Outcome::Regenerated);
    assert_eq!(
        children_of_200(&run.graph),
        BTreeSet::from([concept(100)])
    );
}
