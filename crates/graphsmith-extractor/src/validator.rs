//! Schema conformance checks for candidate graphs

use graphsmith_domain::{CandidateGraph, CandidateNode, SchemaDefinition};
use std::fmt;

/// A way in which a candidate graph breaks the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Node (or relationship endpoint) with an empty id
    EmptyNodeId {
        /// Label of the offending node
        node_type: String,
    },

    /// Node label not in the schema
    UnknownNodeLabel {
        /// Node id
        id: String,
        /// Offending label
        label: String,
    },

    /// Relationship type not in the schema
    UnknownRelationshipType(String),

    /// Relationship endpoint missing from the node list
    DanglingEndpoint {
        /// Relationship type
        rel_type: String,
        /// Id of the missing endpoint
        id: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyNodeId { node_type } => {
                write!(f, "node of type '{}' has an empty id", node_type)
            }
            Violation::UnknownNodeLabel { id, label } => {
                write!(f, "node '{}' has label '{}' outside the schema", id, label)
            }
            Violation::UnknownRelationshipType(rel_type) => {
                write!(f, "relationship type '{}' is outside the schema", rel_type)
            }
            Violation::DanglingEndpoint { rel_type, id } => {
                write!(f, "{} endpoint '{}' is not in the node list", rel_type, id)
            }
        }
    }
}

/// Check a candidate graph against the schema
///
/// Returns every violation found, in graph order. An empty result means the
/// graph conforms.
pub fn check_conformance(graph: &CandidateGraph, schema: &SchemaDefinition) -> Vec<Violation> {
    let mut violations = Vec::new();

    for node in &graph.nodes {
        check_node(node, schema, &mut violations);
    }

    for rel in &graph.relationships {
        if !schema.allows_relationship_type(&rel.rel_type) {
            violations.push(Violation::UnknownRelationshipType(rel.rel_type.clone()));
        }
        for endpoint in [&rel.source, &rel.target] {
            check_node(endpoint, schema, &mut violations);
        }
    }

    for rel in graph.dangling_relationships() {
        for endpoint in [&rel.source, &rel.target] {
            if !graph.contains(endpoint) {
                violations.push(Violation::DanglingEndpoint {
                    rel_type: rel.rel_type.clone(),
                    id: endpoint.id.clone(),
                });
            }
        }
    }

    violations.dedup();
    violations
}

fn check_node(node: &CandidateNode, schema: &SchemaDefinition, violations: &mut Vec<Violation>) {
    if node.id.trim().is_empty() {
        violations.push(Violation::EmptyNodeId {
            node_type: node.node_type.clone(),
        });
    }
    if !schema.allows_node_label(&node.node_type) {
        violations.push(Violation::UnknownNodeLabel {
            id: node.id.clone(),
            label: node.node_type.clone(),
        });
    }
}
