//! Depth command implementation.

use super::{load_release, parse_concept};
use crate::cli::DepthArgs;
use crate::error::Result;
use crate::output::Formatter;
use termgraph_domain::vocabulary::ROOT_CONCEPT;
use termgraph_store::DepthPolicy;

/// Execute the depth command.
pub fn execute_depth(args: DepthArgs, formatter: &Formatter) -> Result<()> {
    let root = match &args.root {
        Some(root) => parse_concept(root)?,
        None => ROOT_CONCEPT,
    };
    let shown = args
        .show
        .iter()
        .map(|id| parse_concept(id))
        .collect::<Result<Vec<_>>>()?;
    let policy = if args.minimum {
        DepthPolicy::Minimum
    } else {
        DepthPolicy::LastWriteWins
    };

    let (mut graph, _) = load_release(&args.release)?;
    let summary = graph.populate_depth(root, args.start, policy)?;
    let depths: Vec<_> = shown
        .into_iter()
        .map(|id| (id, graph.concept(id).ok().and_then(|c| c.depth)))
        .collect();

    println!("{}", formatter.format_depths(&summary, &depths)?);
    Ok(())
}
