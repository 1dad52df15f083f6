//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use graphsmith_extractor::IngestOptions;
use std::path::PathBuf;

/// graphsmith - Extract a knowledge graph from documents with an LLM.
#[derive(Debug, Parser)]
#[command(name = "graphsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "GRAPHSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a graph from each record of a CSV file and store it
    Ingest(IngestArgs),

    /// Show the schema used to guide extraction
    Schema(SchemaArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// CSV file with a header row
    pub csv: PathBuf,

    /// First document index to process
    #[arg(long)]
    pub start: Option<usize>,

    /// Document index to stop before
    #[arg(long)]
    pub end: Option<usize>,

    /// Write to an in-memory graph instead of Neo4j
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestArgs {
    /// Processing window from `--start` and `--end`
    pub fn options(&self) -> IngestOptions {
        match (self.start, self.end) {
            (None, None) => IngestOptions::default(),
            (start, end) => IngestOptions::window(start.unwrap_or(0)..end.unwrap_or(usize::MAX)),
        }
    }
}

/// Arguments for the schema command.
#[derive(Debug, Parser)]
pub struct SchemaArgs {
    /// Print the schema as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::parse_from([
            "graphsmith", "-v", "ingest", "posts.csv", "--start", "101", "--end", "200", "--dry-run",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.csv, PathBuf::from("posts.csv"));
                assert!(args.dry_run);
                assert!(!args.json);
                assert_eq!(args.options(), IngestOptions::window(101..200));
            }
            other => panic!("Expected ingest, got {:?}", other),
        }
    }

    #[test]
    fn test_ingest_defaults_to_all_documents() {
        let cli = Cli::parse_from(["graphsmith", "ingest", "posts.csv"]);
        match cli.command {
            Command::Ingest(args) => assert_eq!(args.options(), IngestOptions::default()),
            other => panic!("Expected ingest, got {:?}", other),
        }
    }

    #[test]
    fn test_open_ended_window() {
        let cli = Cli::parse_from(["graphsmith", "ingest", "posts.csv", "--start", "3"]);
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.options(), IngestOptions::window(3..usize::MAX))
            }
            other => panic!("Expected ingest, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_schema_with_config() {
        let cli = Cli::parse_from(["graphsmith", "schema", "--json", "-c", "graphsmith.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("graphsmith.toml")));
        assert!(matches!(cli.command, Command::Schema(SchemaArgs { json: true })));
    }
}
