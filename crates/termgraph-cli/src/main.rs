//! Termgraph CLI - Load RF2 terminology releases and query their hierarchy.

use clap::Parser;
use termgraph_cli::commands;
use termgraph_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> termgraph_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Load(args) => commands::execute_load(args, &formatter)?,
        Command::Ancestors(args) => commands::execute_ancestors(args, &formatter)?,
        Command::Descendants(args) => commands::execute_descendants(args, &formatter)?,
        Command::Depth(args) => commands::execute_depth(args, &formatter)?,
        Command::Check(args) => commands::execute_check(args, &formatter)?,
        Command::Reconcile(args) => commands::execute_reconcile(args, &config, &formatter)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
