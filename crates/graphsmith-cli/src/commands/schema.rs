//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the schema command.
pub fn execute_schema(_args: SchemaArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_schema(&config.schema_definition())?);
    Ok(())
}
