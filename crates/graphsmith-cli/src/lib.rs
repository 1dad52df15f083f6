//! graphsmith CLI library.
//!
//! This library provides the pieces behind the `graphsmith` binary:
//! argument parsing, configuration loading, command execution and report
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
