//! File-backed collaborators for running reconciliation locally
//!
//! In production the branch metadata and delta export come from the authoring
//! service. These adapters read the same information from disk.

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use termgraph_domain::{BranchMetadata, BranchMetadataSource, DeltaExporter};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    head_timestamp: String,
    previous_release_identifier: String,
}

/// Branch metadata read from a JSON manifest keyed by branch path
///
/// ```json
/// {
///   "MAIN/PROJ": {
///     "headTimestamp": "2024-01-31T12:00:00Z",
///     "previousReleaseIdentifier": "INT_20240101"
///   }
/// }
/// ```
///
/// The manifest is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileBranchMetadata {
    manifest: PathBuf,
}

impl FileBranchMetadata {
    /// Read metadata from `manifest`
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }
}

impl BranchMetadataSource for FileBranchMetadata {
    type Error = anyhow::Error;

    fn fetch_branch_metadata(&self, branch: &str) -> anyhow::Result<BranchMetadata> {
        let content = fs::read_to_string(&self.manifest)
            .with_context(|| format!("reading manifest {}", self.manifest.display()))?;
        let mut entries: HashMap<String, ManifestEntry> = serde_json::from_str(&content)
            .with_context(|| format!("parsing manifest {}", self.manifest.display()))?;
        let entry = entries
            .remove(branch)
            .ok_or_else(|| anyhow!("branch {} is not in the manifest", branch))?;
        let head_timestamp = DateTime::parse_from_rfc3339(&entry.head_timestamp)
            .with_context(|| format!("bad headTimestamp for branch {}", branch))?
            .with_timezone(&Utc);
        Ok(BranchMetadata {
            head_timestamp,
            previous_release: entry.previous_release_identifier,
        })
    }
}

/// Delta exports staged on disk ahead of time
///
/// A branch's delta is the subdirectory named after the branch with `/`
/// replaced by `_`. When there is no such subdirectory the root itself is
/// the delta.
#[derive(Debug, Clone)]
pub struct StagedDeltaExporter {
    root: PathBuf,
}

impl StagedDeltaExporter {
    /// Serve deltas from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DeltaExporter for StagedDeltaExporter {
    type Error = anyhow::Error;

    fn export_delta(&self, branch: &str) -> anyhow::Result<PathBuf> {
        let per_branch = self.root.join(branch.replace('/', "_"));
        if per_branch.is_dir() {
            return Ok(per_branch);
        }
        if !self.root.is_dir() {
            bail!("no staged delta at {}", self.root.display());
        }
        Ok(self.root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn manifest(dir: &std::path::Path, body: &str) -> FileBranchMetadata {
        let path = dir.join("branches.json");
        fs::write(&path, body).unwrap();
        FileBranchMetadata::new(path)
    }

    #[test]
    fn test_fetch_branch_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let source = manifest(
            dir.path(),
            r#"{"MAIN/PROJ": {"headTimestamp": "2024-01-31T12:00:00+01:00", "previousReleaseIdentifier": "INT_20240101"}}"#,
        );
        let metadata = source.fetch_branch_metadata("MAIN/PROJ").unwrap();
        assert_eq!(
            metadata.head_timestamp,
            Utc.with_ymd_and_hms(2024, 1, 31, 11, 0, 0).unwrap()
        );
        assert_eq!(metadata.previous_release, "INT_20240101");
    }

    #[test]
    fn test_unknown_branch() {
        let dir = tempfile::tempdir().unwrap();
        let source = manifest(dir.path(), "{}");
        let err = source.fetch_branch_metadata("MAIN/OTHER").unwrap_err();
        assert!(err.to_string().contains("MAIN/OTHER"));
    }

    #[test]
    fn test_missing_manifest() {
        let source = FileBranchMetadata::new("/nonexistent/branches.json");
        assert!(source.fetch_branch_metadata("MAIN").is_err());
    }

    #[test]
    fn test_staged_delta_prefers_branch_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("MAIN_PROJ")).unwrap();
        let exporter = StagedDeltaExporter::new(dir.path());
        assert_eq!(
            exporter.export_delta("MAIN/PROJ").unwrap(),
            dir.path().join("MAIN_PROJ")
        );
        assert_eq!(exporter.export_delta("MAIN").unwrap(), dir.path());
        assert!(StagedDeltaExporter::new(dir.path().join("absent"))
            .export_delta("MAIN")
            .is_err());
    }
}
