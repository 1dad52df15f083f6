//! Graph entity module - candidate and canonical nodes and relationships

use crate::normalize::{capitalize_label, title_case};
use crate::Document;
use std::collections::BTreeMap;

/// A single key/value property as emitted by the extraction service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Free-form key, normalized to lower camel case before storage
    pub key: String,
    /// Property value
    pub value: String,
}

impl Property {
    /// Create a new property
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Identity of a node inside one graph: its id and its type label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    /// Node identifier
    pub id: String,
    /// Node type label
    pub node_type: String,
}

/// A node as returned by the extraction service, not yet canonicalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNode {
    /// Identifier taken from the text
    pub id: String,
    /// Type label
    pub node_type: String,
    /// Extracted properties in model order (empty when the model sent none)
    pub properties: Vec<Property>,
}

impl CandidateNode {
    /// Create a candidate node without properties
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            properties: Vec::new(),
        }
    }

    /// Attach a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(key, value));
        self
    }

    /// Identity of this node
    pub fn key(&self) -> NodeKey {
        NodeKey {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
        }
    }

    /// Identity this node will have once normalized
    ///
    /// Two candidates that differ only in the casing the normalizer rewrites
    /// end up as the same stored node.
    pub fn normalized_key(&self) -> NodeKey {
        NodeKey {
            id: title_case(&self.id),
            node_type: capitalize_label(&self.node_type),
        }
    }
}

/// A relationship as returned by the extraction service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRelationship {
    /// Start node
    pub source: CandidateNode,
    /// End node
    pub target: CandidateNode,
    /// Relationship type
    pub rel_type: String,
    /// Extracted properties in model order
    pub properties: Vec<Property>,
}

impl CandidateRelationship {
    /// Create a candidate relationship without properties
    pub fn new(source: CandidateNode, target: CandidateNode, rel_type: impl Into<String>) -> Self {
        Self {
            source,
            target,
            rel_type: rel_type.into(),
            properties: Vec::new(),
        }
    }

    /// Attach a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(key, value));
        self
    }
}

/// Full extraction output for one document
///
/// Every relationship endpoint is expected to match a node in `nodes` by
/// value (id and type); the extractor checks this when schema enforcement
/// is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateGraph {
    /// Extracted nodes
    pub nodes: Vec<CandidateNode>,
    /// Extracted relationships
    pub relationships: Vec<CandidateRelationship>,
}

impl CandidateGraph {
    /// Create a candidate graph
    pub fn new(nodes: Vec<CandidateNode>, relationships: Vec<CandidateRelationship>) -> Self {
        Self {
            nodes,
            relationships,
        }
    }

    /// Whether the model found nothing
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    /// Relationships whose source or target is missing from the node list
    ///
    /// Endpoints are matched by normalized key, so `alice`/`user` finds the
    /// node `Alice`/`user`.
    pub fn dangling_relationships(&self) -> Vec<&CandidateRelationship> {
        self.relationships
            .iter()
            .filter(|rel| !self.contains(&rel.source) || !self.contains(&rel.target))
            .collect()
    }

    /// Whether a node with the same normalized key is in the node list
    pub fn contains(&self, node: &CandidateNode) -> bool {
        let key = node.normalized_key();
        self.nodes.iter().any(|n| n.normalized_key() == key)
    }
}

/// A canonical node ready for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Title-cased identifier
    pub id: String,
    /// Capitalized type label
    pub node_type: String,
    /// Properties keyed by lower-camel-case key; always contains `name`
    pub properties: BTreeMap<String, String>,
}

impl GraphNode {
    /// Identity of this node
    pub fn key(&self) -> NodeKey {
        NodeKey {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
        }
    }
}

/// A canonical relationship ready for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRelationship {
    /// Normalized start node
    pub source: GraphNode,
    /// Normalized end node
    pub target: GraphNode,
    /// Relationship type, kept verbatim
    pub rel_type: String,
    /// Properties keyed by lower-camel-case key
    pub properties: BTreeMap<String, String>,
}

/// The canonical entities derived from one document, committed as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFragment {
    /// Canonical nodes
    pub nodes: Vec<GraphNode>,
    /// Canonical relationships
    pub relationships: Vec<GraphRelationship>,
    /// Document the fragment was extracted from
    pub source: Document,
}

impl GraphFragment {
    /// Whether a node with the same id and type is part of this fragment
    pub fn contains_node(&self, node: &GraphNode) -> bool {
        self.nodes
            .iter()
            .any(|n| n.id == node.id && n.node_type == node.node_type)
    }

    /// Find a node by its canonical id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_relationships_detected() {
        let alice = CandidateNode::new("alice", "user");
        let question = CandidateNode::new("datetime question", "question");
        let ghost = CandidateNode::new("bob", "user");

        let graph = CandidateGraph::new(
            vec![alice.clone(), question.clone()],
            vec![
                CandidateRelationship::new(alice.clone(), question.clone(), "ASKS"),
                CandidateRelationship::new(ghost, question, "ANSWERS"),
            ],
        );

        let dangling = graph.dangling_relationships();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].rel_type, "ANSWERS");
    }

    #[test]
    fn test_endpoint_match_requires_same_type() {
        let alice = CandidateNode::new("alice", "user");
        let alice_tag = CandidateNode::new("alice", "tag");
        let graph = CandidateGraph::new(
            vec![alice.clone()],
            vec![CandidateRelationship::new(alice, alice_tag, "TAGGED_WITH")],
        );
        assert_eq!(graph.dangling_relationships().len(), 1);
    }

    #[test]
    fn test_endpoint_match_ignores_normalized_casing() {
        let node = CandidateNode::new("Alice", "user");
        let endpoint = CandidateNode::new("alice", "User");
        let question = CandidateNode::new("datetime question", "question");
        let graph = CandidateGraph::new(
            vec![node, question.clone()],
            vec![CandidateRelationship::new(endpoint.clone(), question, "ASKS")],
        );

        assert!(graph.contains(&endpoint));
        assert!(graph.dangling_relationships().is_empty());
    }

    #[test]
    fn test_endpoint_match_keeps_inner_casing() {
        // Normalization only touches first letters
        let graph = CandidateGraph::new(vec![CandidateNode::new("gpt-4o", "tag")], Vec::new());
        assert!(!graph.contains(&CandidateNode::new("GPT-4o", "tag")));
    }

    #[test]
    fn test_empty_graph() {
        assert!(CandidateGraph::default().is_empty());
    }
}
