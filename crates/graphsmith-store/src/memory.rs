//! In-memory graph sink

use async_trait::async_trait;
use graphsmith_domain::traits::GraphSink;
use graphsmith_domain::{Document, GraphFragment, GraphNode, NodeKey, SinkError};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

type RelationshipKey = (NodeKey, String, NodeKey);

#[derive(Debug, Default)]
struct MemoryGraph {
    nodes: BTreeMap<NodeKey, BTreeMap<String, String>>,
    relationships: BTreeMap<RelationshipKey, BTreeMap<String, String>>,
    submissions: Vec<Document>,
}

impl MemoryGraph {
    fn upsert_node(&mut self, node: &GraphNode) {
        self.nodes
            .entry(node.key())
            .or_default()
            .extend(node.properties.clone());
    }
}

/// Graph sink that keeps everything in process memory
///
/// Applies the same merge rules as the Neo4j sink. Every call to `add` is
/// recorded, including rejected ones, so tests can assert on submissions.
#[derive(Debug, Default)]
pub struct MemoryGraphSink {
    graph: Mutex<MemoryGraph>,
    reject_when: Vec<String>,
}

impl MemoryGraphSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any fragment whose source document contains `needle`
    pub fn reject_documents_containing(mut self, needle: impl Into<String>) -> Self {
        self.reject_when.push(needle.into());
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryGraph>, SinkError> {
        self.graph
            .lock()
            .map_err(|e| SinkError::Connection(format!("Store lock error: {}", e)))
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.lock().map(|g| g.nodes.len()).unwrap_or(0)
    }

    /// Number of distinct relationships
    pub fn relationship_count(&self) -> usize {
        self.lock().map(|g| g.relationships.len()).unwrap_or(0)
    }

    /// Properties of a node, if present
    pub fn node(&self, id: &str, node_type: &str) -> Option<BTreeMap<String, String>> {
        let key = NodeKey {
            id: id.to_string(),
            node_type: node_type.to_string(),
        };
        self.lock().ok()?.nodes.get(&key).cloned()
    }

    /// Whether a relationship of `rel_type` joins the two node ids
    pub fn has_relationship(&self, source_id: &str, rel_type: &str, target_id: &str) -> bool {
        self.lock()
            .map(|g| {
                g.relationships.keys().any(|(s, t, e)| {
                    s.id == source_id && t == rel_type && e.id == target_id
                })
            })
            .unwrap_or(false)
    }

    /// Source documents of every `add` call, in call order
    pub fn submissions(&self) -> Vec<Document> {
        self.lock().map(|g| g.submissions.clone()).unwrap_or_default()
    }

    /// Number of `add` calls for fragments of `document`
    pub fn submission_count(&self, document: &Document) -> usize {
        self.lock()
            .map(|g| g.submissions.iter().filter(|d| *d == document).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl GraphSink for MemoryGraphSink {
    async fn add(&self, fragment: &GraphFragment) -> Result<(), SinkError> {
        let mut graph = self.lock()?;
        graph.submissions.push(fragment.source.clone());

        if let Some(needle) = self
            .reject_when
            .iter()
            .find(|needle| fragment.source.content.contains(needle.as_str()))
        {
            return Err(SinkError::Rejected(format!(
                "document matches rejection rule '{}'",
                needle
            )));
        }

        // Validate everything before touching the graph so a failure
        // leaves no partial fragment behind.
        let empty_label = fragment
            .nodes
            .iter()
            .map(|n| n.node_type.as_str())
            .chain(fragment.relationships.iter().map(|r| r.rel_type.as_str()))
            .any(|label| label.trim().is_empty());
        if empty_label {
            return Err(SinkError::Rejected("empty label or type".to_string()));
        }

        for node in &fragment.nodes {
            graph.upsert_node(node);
        }
        for rel in &fragment.relationships {
            graph.upsert_node(&rel.source);
            graph.upsert_node(&rel.target);
            graph
                .relationships
                .entry((rel.source.key(), rel.rel_type.clone(), rel.target.key()))
                .or_default()
                .extend(rel.properties.clone());
        }

        debug!(
            document = %fragment.source.reference(),
            nodes = fragment.nodes.len(),
            relationships = fragment.relationships.len(),
            "Fragment stored in memory"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsmith_domain::{normalize_node, normalize_relationship, CandidateNode, CandidateRelationship};

    fn fragment(doc: &str, nodes: &[CandidateNode], rels: &[CandidateRelationship]) -> GraphFragment {
        GraphFragment {
            nodes: nodes.iter().map(normalize_node).collect(),
            relationships: rels.iter().map(normalize_relationship).collect(),
            source: Document::new(doc),
        }
    }

    #[tokio::test]
    async fn test_nodes_upserted_by_id_and_type() {
        let sink = MemoryGraphSink::new();
        let first = CandidateNode::new("alice", "user").with_property("reputation", "10");
        let second = CandidateNode::new("alice", "user").with_property("location", "Oslo");
        let tag = CandidateNode::new("alice", "tag");

        sink.add(&fragment("a", &[first], &[])).await.unwrap();
        sink.add(&fragment("b", &[second, tag], &[])).await.unwrap();

        assert_eq!(sink.node_count(), 2);
        let props = sink.node("Alice", "User").unwrap();
        assert_eq!(props["reputation"], "10");
        assert_eq!(props["location"], "Oslo");
        assert_eq!(props["name"], "Alice");
    }

    #[tokio::test]
    async fn test_relationships_merged() {
        let sink = MemoryGraphSink::new();
        let alice = CandidateNode::new("alice", "user");
        let question = CandidateNode::new("q1", "question");
        let asks = CandidateRelationship::new(alice.clone(), question.clone(), "ASKS");

        sink.add(&fragment("a", &[alice.clone(), question.clone()], &[asks.clone()]))
            .await
            .unwrap();
        sink.add(&fragment("b", &[alice, question], &[asks])).await.unwrap();

        assert_eq!(sink.relationship_count(), 1);
        assert!(sink.has_relationship("Alice", "ASKS", "Q1"));
        assert_eq!(sink.submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_relationship_endpoints_created() {
        let sink = MemoryGraphSink::new();
        let rel = CandidateRelationship::new(
            CandidateNode::new("json", "module"),
            CandidateNode::new("datetime", "module"),
            "IMPORTS",
        );
        sink.add(&fragment("a", &[], &[rel])).await.unwrap();
        assert_eq!(sink.node_count(), 2);
    }

    #[tokio::test]
    async fn test_rejection_rule_records_submission() {
        let sink = MemoryGraphSink::new().reject_documents_containing("poison");
        let doc = fragment("poison pill", &[CandidateNode::new("x", "tag")], &[]);

        let result = sink.add(&doc).await;
        assert!(matches!(result, Err(SinkError::Rejected(_))));
        assert_eq!(sink.node_count(), 0);
        assert_eq!(sink.submission_count(&doc.source), 1);
    }

    #[tokio::test]
    async fn test_empty_label_rejected_atomically() {
        let sink = MemoryGraphSink::new();
        let nodes = [CandidateNode::new("ok", "tag"), CandidateNode::new("bad", "")];
        let result = sink.add(&fragment("doc", &nodes, &[])).await;
        assert!(result.is_err());
        assert_eq!(sink.node_count(), 0);
    }
}
