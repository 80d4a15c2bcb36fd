//! Ancestors and descendants command implementations.

use super::{load_release, parse_concept};
use crate::cli::{AncestorsArgs, DescendantsArgs};
use crate::error::Result;
use crate::output::Formatter;
use termgraph_domain::CharacteristicType;

fn characteristic(stated: bool) -> CharacteristicType {
    if stated {
        CharacteristicType::Stated
    } else {
        CharacteristicType::Inferred
    }
}

/// Execute the ancestors command.
pub fn execute_ancestors(args: AncestorsArgs, formatter: &Formatter) -> Result<()> {
    let id = parse_concept(&args.id)?;
    let (graph, _) = load_release(&args.release)?;
    let ancestors = graph.ancestors(id, characteristic(args.stated))?;
    println!("{}", formatter.format_concepts(&graph, &ancestors)?);
    Ok(())
}

/// Execute the descendants command.
pub fn execute_descendants(args: DescendantsArgs, formatter: &Formatter) -> Result<()> {
    let id = parse_concept(&args.id)?;
    let (graph, _) = load_release(&args.release)?;
    let descendants = graph.descendants(id, characteristic(args.stated), args.depth)?;
    println!("{}", formatter.format_concepts(&graph, &descendants)?);
    Ok(())
}
