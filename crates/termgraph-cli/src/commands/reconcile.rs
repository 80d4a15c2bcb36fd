//! Reconcile command implementation.

use crate::cli::ReconcileArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use termgraph_reconciler::{FileBranchMetadata, Reconciler, StagedDeltaExporter};

/// Execute the reconcile command.
pub fn execute_reconcile(args: ReconcileArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let reconciler_config = config.reconciler()?.clone();
    let manifest = args
        .manifest
        .or_else(|| config.sources.manifest.clone())
        .ok_or_else(|| CliError::InvalidInput("no branch manifest; pass --manifest".to_string()))?;
    let exports = args
        .delta
        .or_else(|| config.sources.exports_dir.clone())
        .ok_or_else(|| CliError::InvalidInput("no delta exports; pass --delta".to_string()))?;

    let reconciler = Reconciler::new(
        reconciler_config,
        FileBranchMetadata::new(manifest),
        StagedDeltaExporter::new(exports),
    );

    if args.check {
        let (state, metadata) = reconciler.check(&args.branch)?;
        let message = format!(
            "Cache for {} is {} (branch head {}, based on {})",
            args.branch,
            state,
            metadata.head_timestamp.to_rfc3339(),
            metadata.previous_release
        );
        if state.is_reusable() {
            println!("{}", formatter.success(&message));
        } else {
            println!("{}", formatter.warning(&message));
        }
        return Ok(());
    }

    let run = reconciler.reconcile(&args.branch)?;
    println!("{}", formatter.format_reconcile(&run.report)?);
    Ok(())
}
