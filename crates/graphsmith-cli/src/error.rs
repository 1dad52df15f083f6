//! Error types for the CLI application.

use graphsmith_domain::SinkError;
use graphsmith_llm::LlmError;
use graphsmith_source::SourceError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// All of these abort the run. Per-document failures never surface here;
/// they are part of the ingestion report.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Documents could not be loaded
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The LLM provider could not be constructed
    #[error("LLM setup error: {0}")]
    Llm(#[from] LlmError),

    /// The graph store could not be reached
    #[error("Graph store error: {0}")]
    Sink(#[from] SinkError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
