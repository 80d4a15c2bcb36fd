//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Termgraph - Load RF2 terminology releases and query their hierarchy.
#[derive(Debug, Parser)]
#[command(name = "termgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TERMGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a release and print load counters and graph statistics
    Load(LoadArgs),

    /// List every ancestor of a concept
    Ancestors(AncestorsArgs),

    /// List descendants of a concept
    Descendants(DescendantsArgs),

    /// Run the depth pass from a root concept
    Depth(DepthArgs),

    /// Report dangling references and hierarchy gaps
    Check(CheckArgs),

    /// Reuse or rebuild the cached snapshot of a branch
    Reconcile(ReconcileArgs),
}

/// Which release to load.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Directory holding Snapshot files
    pub dir: PathBuf,

    /// Directory of Delta files applied on top of the snapshot
    #[arg(long)]
    pub delta: Option<PathBuf>,

    /// Fail on rows referencing components that are not loaded yet
    #[arg(long)]
    pub require_existing: bool,
}

/// Arguments for the load command.
#[derive(Debug, Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Write the loaded graph back out as a snapshot into this directory
    #[arg(long)]
    pub write: Option<PathBuf>,

    /// File name label used when writing
    #[arg(long, default_value = "TERMGRAPH")]
    pub label: String,
}

/// Arguments for the ancestors command.
#[derive(Debug, Args)]
pub struct AncestorsArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Concept id
    pub id: String,

    /// Walk the stated hierarchy instead of the inferred one
    #[arg(long)]
    pub stated: bool,
}

/// Arguments for the descendants command.
#[derive(Debug, Args)]
pub struct DescendantsArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Concept id
    pub id: String,

    /// Walk the stated hierarchy instead of the inferred one
    #[arg(long)]
    pub stated: bool,

    /// Levels below the immediate children (0 = children only)
    #[arg(short, long)]
    pub depth: Option<u32>,
}

/// Arguments for the depth command.
#[derive(Debug, Args)]
pub struct DepthArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Root concept id (defaults to the terminology root)
    #[arg(long)]
    pub root: Option<String>,

    /// Depth assigned to the root
    #[arg(long, default_value = "0")]
    pub start: u32,

    /// Keep the shortest path instead of the last one walked
    #[arg(long)]
    pub minimum: bool,

    /// Concepts whose depth to print
    #[arg(long = "show")]
    pub show: Vec<String>,
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

/// Arguments for the reconcile command.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Branch path, e.g. MAIN/PROJECT
    #[arg(short, long)]
    pub branch: String,

    /// JSON manifest of branch metadata (overrides the config file)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Directory of staged delta exports (overrides the config file)
    #[arg(long)]
    pub delta: Option<PathBuf>,

    /// Only report whether the cache is fresh
    #[arg(long)]
    pub check: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendants_command() {
        let cli = Cli::parse_from([
            "termgraph",
            "descendants",
            "release/",
            "138875005",
            "--stated",
            "--depth",
            "1",
        ]);
        match cli.command {
            Command::Descendants(args) => {
                assert_eq!(args.id, "138875005");
                assert!(args.stated);
                assert_eq!(args.depth, Some(1));
                assert_eq!(args.release.dir, PathBuf::from("release/"));
            }
            _ => panic!("Expected Descendants command"),
        }
    }

    #[test]
    fn test_load_with_delta() {
        let cli = Cli::parse_from([
            "termgraph",
            "-vv",
            "load",
            "snap",
            "--delta",
            "delta",
            "--require-existing",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Load(args) => {
                assert_eq!(args.release.delta, Some(PathBuf::from("delta")));
                assert!(args.release.require_existing);
                assert_eq!(args.label, "TERMGRAPH");
            }
            _ => panic!("Expected Load command"),
        }
    }

    #[test]
    fn test_depth_show_repeats() {
        let cli = Cli::parse_from([
            "termgraph", "depth", "snap", "--minimum", "--show", "1", "--show", "2",
        ]);
        match cli.command {
            Command::Depth(args) => {
                assert!(args.minimum);
                assert_eq!(args.show, vec!["1", "2"]);
                assert!(args.root.is_none());
            }
            _ => panic!("Expected Depth command"),
        }
    }

    #[test]
    fn test_reconcile_requires_branch() {
        assert!(Cli::try_parse_from(["termgraph", "reconcile"]).is_err());
    }
}
