//! Configuration for the snapshot reconciler
//!
//! Says where cached snapshots and published releases live, and which
//! project and environment a cache belongs to.

use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use termgraph_store::DepthPolicy;

/// Configuration for the reconciler
///
/// # Examples
///
/// ```
/// use termgraph_reconciler::ReconcilerConfig;
///
/// let config: ReconcilerConfig = toml::from_str(r#"
///     cache_root = "/var/cache/termgraph"
///     releases_dir = "/srv/releases"
///     project = "SNOMEDCT"
///     environment = "uat"
///     depth_policy = "minimum"
/// "#).unwrap();
/// assert!(config.validate().is_ok());
/// assert!(!config.require_existing);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Directory holding one cached snapshot per (project, branch, environment)
    pub cache_root: PathBuf,

    /// Directory holding unpacked published releases, one directory each,
    /// named by release identifier
    pub releases_dir: PathBuf,

    /// Project the cached snapshots belong to
    pub project: String,

    /// Environment name, e.g. `dev`, `uat`, `prod`
    pub environment: String,

    /// Run the depth pass from the root concept after loading
    /// Default: no depth pass
    #[serde(default)]
    pub depth_policy: Option<DepthPolicy>,

    /// Fail on rows that reference components not yet loaded
    /// Default: false (forward references create stubs)
    #[serde(default)]
    pub require_existing: bool,
}

impl Default for ReconcilerConfig {
    /// Caches under `./cache`, releases under `./releases`
    fn default() -> Self {
        Self {
            cache_root: PathBuf::from("cache"),
            releases_dir: PathBuf::from("releases"),
            project: "SNOMEDCT".to_string(),
            environment: "dev".to_string(),
            depth_policy: None,
            require_existing: false,
        }
    }
}

impl ReconcilerConfig {
    /// Read and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ReconcileError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values make sense together
    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(ReconcileError::Config("project must not be empty".to_string()));
        }
        if self.environment.trim().is_empty() {
            return Err(ReconcileError::Config(
                "environment must not be empty".to_string(),
            ));
        }
        if self.project.contains('/') || self.environment.contains('/') {
            return Err(ReconcileError::Config(
                "project and environment must not contain '/'".to_string(),
            ));
        }
        if self.cache_root == self.releases_dir {
            return Err(ReconcileError::Config(
                "cache_root and releases_dir must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory of the cached snapshot for a branch
    ///
    /// ```
    /// use std::path::Path;
    /// use termgraph_reconciler::ReconcilerConfig;
    ///
    /// let config = ReconcilerConfig::default();
    /// assert_eq!(
    ///     config.cache_path("MAIN/2024-01"),
    ///     Path::new("cache/SNOMEDCT_MAIN_2024-01_dev")
    /// );
    /// ```
    pub fn cache_path(&self, branch: &str) -> PathBuf {
        self.cache_root.join(format!(
            "{}_{}_{}",
            self.project,
            branch.replace('/', "_"),
            self.environment
        ))
    }

    /// Directory of a published release
    pub fn release_path(&self, release: &str) -> PathBuf {
        self.releases_dir.join(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReconcilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.depth_policy, None);
    }

    #[test]
    fn test_validate_rejects_empty_project() {
        let config = ReconcilerConfig {
            project: " ".to_string(),
            ..ReconcilerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ReconcileError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_shared_directory() {
        let config = ReconcilerConfig {
            cache_root: PathBuf::from("data"),
            releases_dir: PathBuf::from("data"),
            ..ReconcilerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_path_flattens_branch() {
        let config = ReconcilerConfig {
            cache_root: PathBuf::from("/tmp/c"),
            project: "PROJ".to_string(),
            environment: "prod".to_string(),
            ..ReconcilerConfig::default()
        };
        assert_eq!(
            config.cache_path("MAIN/PROJ/TASK-1"),
            PathBuf::from("/tmp/c/PROJ_MAIN_PROJ_TASK-1_prod")
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reconciler.toml");
        fs::write(
            &path,
            "cache_root = \"c\"\nreleases_dir = \"r\"\nproject = \"P\"\nenvironment = \"dev\"\ndepth_policy = \"last-write-wins\"\n",
        )
        .unwrap();
        let config = ReconcilerConfig::from_file(&path).unwrap();
        assert_eq!(config.depth_policy, Some(DepthPolicy::LastWriteWins));
        assert_eq!(config.release_path("INT_20240101"), PathBuf::from("r/INT_20240101"));
    }

    #[test]
    fn test_from_file_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reconciler.toml");
        fs::write(&path, "project = 3").unwrap();
        assert!(matches!(
            ReconcilerConfig::from_file(&path),
            Err(ReconcileError::Config(_))
        ));
    }
}
