//! graphsmith Extractor
//!
//! Turns documents into graph fragments using a structured-generation
//! service, then commits them to a graph sink.
//!
//! # Architecture
//!
//! ```text
//! Document → Extractor → LLM → CandidateGraph → Normalizer → GraphFragment → GraphSink
//! ```
//!
//! # Key Features
//!
//! - **Schema-guided prompts**: allowed labels and relationship types are
//!   part of the instructions
//! - **Conformance check**: off-schema labels and dangling endpoints are
//!   rejected before anything reaches the sink
//! - **Failure isolation**: one bad document is recorded and skipped
//! - **Timeouts**: both the extraction call and the sink write are bounded
//!
//! # Example Usage
//!
//! ```no_run
//! use graphsmith_domain::{Document, SchemaDefinition};
//! use graphsmith_extractor::{Extractor, ExtractorConfig, IngestionPipeline};
//! use graphsmith_llm::MockProvider;
//! use graphsmith_store::MemoryGraphSink;
//!
//! # async fn example() {
//! let llm = MockProvider::new(r#"{"nodes": [], "rels": []}"#);
//! let pipeline = IngestionPipeline::new(Extractor::new(llm, ExtractorConfig::default()));
//! let sink = MemoryGraphSink::new();
//!
//! let documents = vec![Document::new("User Alice asked how to serialize datetime in Python.")];
//! let report = pipeline
//!     .ingest(&documents, &SchemaDefinition::stack_overflow(), &sink)
//!     .await;
//!
//! println!("Succeeded: {}, failed: {}", report.succeeded, report.failed);
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod pipeline;
mod prompt;
mod types;
mod validator;


pub use config::ExtractorConfig;
pub use error::{ExtractionError, IngestError};
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use pipeline::IngestionPipeline;
pub use prompt::PromptBuilder;
pub use types::{IngestOptions, IngestionFailure, IngestionReport};
pub use validator::{check_conformance, Violation};
