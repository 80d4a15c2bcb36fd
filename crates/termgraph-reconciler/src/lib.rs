//! Termgraph Reconciler
//!
//! Decides whether a branch's cached snapshot can be reused or has to be
//! rebuilt, and produces the loaded graph either way.
//!
//! # Overview
//!
//! The reconciler is responsible for:
//! - **Staleness check**: comparing the cache's creation time with the branch
//!   head timestamp
//! - **Regeneration**: loading the previous release, then a delta export of
//!   the branch, then writing the result as the new cache
//! - **Reporting**: what was decided, how long it took, and load counters
//!
//! | Cache | Branch head | Result |
//! |-------|-------------|--------|
//! | missing | any | regenerate |
//! | created at T0 | T1 > T0 | regenerate |
//! | created at T0 | T1 <= T0 | reuse |
//!
//! Collaborators (branch metadata, delta export) are traits from
//! `termgraph-domain`. [`FileBranchMetadata`] and [`StagedDeltaExporter`] read
//! them from disk.
//!
//! # Configuration
//!
//! ```toml
//! cache_root = "/var/cache/termgraph"
//! releases_dir = "/srv/releases"
//! project = "SNOMEDCT"
//! environment = "uat"
//! depth_policy = "last-write-wins"
//! require_existing = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod local;
mod reconciler;
mod report;

pub use config::ReconcilerConfig;
pub use error::{ReconcileError, Result};
pub use local::{FileBranchMetadata, StagedDeltaExporter};
pub use reconciler::{archive_created, is_stale, Reconciler, Reconciliation};
pub use report::{CacheState, Outcome, ReconcileReport};
