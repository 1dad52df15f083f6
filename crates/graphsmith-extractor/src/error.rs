//! Error types for extraction and ingestion

use graphsmith_domain::SinkError;
use thiserror::Error;

/// Errors that can occur while extracting a candidate graph from one document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// LLM provider error (transport, authentication, rate limit)
    #[error("LLM error: {0}")]
    Llm(String),

    /// The provider did not answer in time
    #[error("Extraction timeout after {0}s")]
    Timeout(u64),

    /// The response does not have the candidate graph shape
    #[error("Invalid graph format: {0}")]
    InvalidFormat(String),

    /// The response uses labels outside the schema or dangling endpoints
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} bytes (max: {1})")]
    TextTooLong(usize, usize),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::InvalidFormat(format!("JSON parse error: {}", e))
    }
}

/// Why a document did not make it into the graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// Extraction failed; nothing was sent to the sink
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The sink refused or failed to commit the fragment
    #[error("sink failed: {0}")]
    Sink(#[from] SinkError),
}

impl IngestError {
    /// Short stage name for reports
    pub fn stage(&self) -> &'static str {
        match self {
            IngestError::Extraction(_) => "extraction",
            IngestError::Sink(_) => "sink",
        }
    }
}
