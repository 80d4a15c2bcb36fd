//! Check command implementation.

use super::load_release;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the check command. Fails when any check found a problem.
pub fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    let (graph, _) = load_release(&args.release)?;
    let report = graph.integrity_report();
    println!("{}", formatter.format_integrity(&report)?);

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "release has {} integrity problems",
            report.dangling.len()
                + report.missing_inferred_parent.len()
                + report.fully_defined_without_stated_parent.len()
        )))
    }
}
