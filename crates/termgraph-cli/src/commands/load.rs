//! Load command implementation.

use super::load_release;
use crate::cli::LoadArgs;
use crate::error::Result;
use crate::output::Formatter;
use termgraph_store::rf2::SnapshotWriter;

/// Execute the load command.
pub fn execute_load(args: LoadArgs, formatter: &Formatter) -> Result<()> {
    let (graph, metrics) = load_release(&args.release)?;
    println!("{}", formatter.format_load(&graph.stats(), &metrics)?);

    let dangling = graph.dangling_references();
    if !dangling.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} unresolved references", dangling.len()))
        );
    }

    if let Some(dir) = &args.write {
        let summary = SnapshotWriter::new(args.label.as_str()).write(&graph, dir)?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Wrote {} rows to {} ({} omitted)",
                summary.total_rows(),
                dir.display(),
                summary.omitted
            ))
        );
    }

    Ok(())
}
