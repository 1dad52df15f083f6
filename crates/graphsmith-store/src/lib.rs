//! Graphsmith Storage Layer
//!
//! Implements the `GraphSink` trait from `graphsmith-domain`.
//!
//! # Sinks
//!
//! - `MemoryGraphSink`: in-process graph with the same merge rules as Neo4j,
//!   used for dry runs and tests
//! - `Neo4jGraphSink`: commits each fragment in one Bolt transaction
//!
//! # Merge semantics
//!
//! Nodes are upserted by (id, type) and their properties merged, later
//! values winning. Relationships are merged by (source, type, target).
//!
//! # Examples
//!
//! ```
//! use graphsmith_store::MemoryGraphSink;
//!
//! let sink = MemoryGraphSink::new();
//! assert_eq!(sink.node_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod cypher;
pub mod memory;
pub mod neo4j;

pub use cypher::{fragment_statements, CypherStatement};
pub use memory::MemoryGraphSink;
pub use neo4j::Neo4jGraphSink;
