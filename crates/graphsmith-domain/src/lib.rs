//! Graphsmith Domain Layer
//!
//! Core model for turning documents into knowledge-graph fragments. This crate
//! holds the value types, the schema catalog, the normalization rules and the
//! trait seams that infrastructure crates implement. It performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Document**: one unit of source text plus metadata, the ingestion granularity
//! - **Candidate graph**: unvalidated nodes and relationships returned by an LLM
//! - **Canonical entity**: a node or relationship after normalization
//! - **Graph fragment**: the canonical entities derived from one document
//! - **Schema definition**: the closed vocabulary of labels and relationship types
//!
//! ## Flow
//!
//! ```text
//! Document → LlmProvider → CandidateGraph → normalize → GraphFragment → GraphSink
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod graph;
pub mod normalize;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use document::Document;
pub use graph::{
    CandidateGraph, CandidateNode, CandidateRelationship, GraphFragment, GraphNode,
    GraphRelationship, NodeKey, Property,
};
pub use normalize::{format_property_key, normalize_graph, normalize_node, normalize_relationship};
pub use schema::SchemaDefinition;
pub use traits::{GraphSink, LlmProvider, SinkError};
