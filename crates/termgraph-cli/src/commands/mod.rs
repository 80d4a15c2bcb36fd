//! Command implementations.

pub mod check;
pub mod closure;
pub mod depth;
pub mod load;
pub mod reconcile;

pub use self::check::execute_check;
pub use self::closure::{execute_ancestors, execute_descendants};
pub use self::depth::execute_depth;
pub use self::load::execute_load;
pub use self::reconcile::execute_reconcile;

use crate::cli::ReleaseArgs;
use crate::error::Result;
use termgraph_domain::{ComponentKind, SctId};
use termgraph_store::rf2::{LoadOptions, ReleaseLoader, ReleaseType};
use termgraph_store::{GraphStore, LoadMetrics};

/// Load the snapshot, then the delta if one was given.
pub fn load_release(args: &ReleaseArgs) -> Result<(GraphStore, LoadMetrics)> {
    let mut graph = GraphStore::new();
    let options = LoadOptions {
        require_existing: args.require_existing,
    };
    let mut loader = ReleaseLoader::with_options(&mut graph, options);
    loader.load_directory(&args.dir, ReleaseType::Snapshot)?;
    if let Some(delta) = &args.delta {
        loader.load_directory(delta, ReleaseType::Delta)?;
    }
    let metrics = loader.into_metrics();
    Ok((graph, metrics))
}

/// Parse a concept id given on the command line.
pub fn parse_concept(text: &str) -> Result<SctId> {
    Ok(SctId::parse(text.trim())?.expect_kind(ComponentKind::Concept)?)
}
