//! Termgraph Storage Layer
//!
//! In-memory graph of one RF2 release, and everything that reads or writes it.
//!
//! # Architecture
//!
//! - [`GraphStore`]: concept and description indexes, relationship ownership,
//!   parent/child adjacency per characteristic type, historical association
//!   reverse index
//! - [`rf2`]: file kinds, the two-phase [`rf2::ReleaseLoader`] and the
//!   [`rf2::SnapshotWriter`]
//! - Closure queries memoised per load cycle, and the hierarchy depth pass
//! - Reference set conflicts are resolved as rows arrive: the latest member
//!   for a (component, refset) pair wins
//!
//! # Examples
//!
//! ```no_run
//! use termgraph_domain::{vocabulary::ROOT_CONCEPT, CharacteristicType};
//! use termgraph_store::rf2::{ReleaseLoader, ReleaseType};
//! use termgraph_store::{DepthPolicy, GraphStore};
//! use std::path::Path;
//!
//! let mut graph = GraphStore::new();
//! ReleaseLoader::new(&mut graph)
//!     .load_directory(Path::new("SnomedCT_InternationalRF2"), ReleaseType::Snapshot)
//!     .unwrap();
//! graph.populate_depth(ROOT_CONCEPT, 0, DepthPolicy::default()).unwrap();
//! let ancestors = graph.ancestors(ROOT_CONCEPT, CharacteristicType::Inferred).unwrap();
//! assert!(ancestors.is_empty());
//! ```

#![warn(missing_docs)]

mod closure;
mod depth;
mod error;
mod graph;
mod metrics;
pub mod rf2;

pub use depth::{DepthPolicy, DepthSummary};
pub use error::{GraphError, LoadError, ParseError, Result};
pub use graph::{DanglingReferences, GraphStats, GraphStore, IntegrityReport};
pub use metrics::LoadMetrics;
