//! graphsmith CLI - Build a knowledge graph from documents.

use clap::Parser;
use graphsmith_cli::commands;
use graphsmith_cli::{AppConfig, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so reports on stdout stay machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> graphsmith_cli::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_env();

    let color_enabled = !cli.no_color;

    match cli.command {
        Command::Ingest(args) => {
            let formatter = Formatter::new(args.json, color_enabled && !args.json);
            commands::execute_ingest(args, &config, &formatter).await?;
        }
        Command::Schema(args) => {
            let formatter = Formatter::new(args.json, color_enabled && !args.json);
            commands::execute_schema(args, &config, &formatter)?;
        }
    }

    Ok(())
}
