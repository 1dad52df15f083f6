//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in `graphsmith-llm` and `graphsmith-store`.

use crate::GraphFragment;
use async_trait::async_trait;
use thiserror::Error;

/// Trait for structured-generation services
///
/// Implemented by the infrastructure layer (graphsmith-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a JSON document following the instructions in `system`
    ///
    /// Implementations make exactly one call to the service and never retry.
    async fn generate_structured(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model answering requests, for logs and reports
    fn model_name(&self) -> &str;
}

/// Errors a graph sink can report for one fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// A write statement failed and the transaction was rolled back
    #[error("Query error: {0}")]
    Query(String),

    /// The store refused the fragment
    #[error("Fragment rejected: {0}")]
    Rejected(String),

    /// The write did not finish within the configured time
    #[error("Sink timeout after {0}s")]
    Timeout(u64),
}

/// Trait for transactional graph stores
///
/// Implemented by the infrastructure layer (graphsmith-store). Nodes are
/// upserted by (id, type); relationships are merged by endpoints and type.
/// A fragment is committed entirely or not at all.
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Commit one fragment
    async fn add(&self, fragment: &GraphFragment) -> Result<(), SinkError>;
}
