//! Cypher generation for graph fragments
//!
//! Labels and relationship types cannot be query parameters, so they are
//! inlined as backtick-quoted identifiers with any backticks removed.
//! Everything else travels as a parameter.

use graphsmith_domain::{GraphFragment, GraphNode, GraphRelationship, SinkError};
use std::collections::BTreeMap;

/// A parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A string
    Text(String),
    /// A string-to-string map
    Map(BTreeMap<String, String>),
}

/// One parameterized Cypher statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherStatement {
    /// Query text
    pub text: String,
    /// Named parameters
    pub params: BTreeMap<String, ParamValue>,
}

impl CypherStatement {
    fn new(text: String) -> Self {
        Self {
            text,
            params: BTreeMap::new(),
        }
    }

    fn text_param(mut self, key: &str, value: &str) -> Self {
        self.params
            .insert(key.to_string(), ParamValue::Text(value.to_string()));
        self
    }

    fn map_param(mut self, key: &str, value: &BTreeMap<String, String>) -> Self {
        self.params
            .insert(key.to_string(), ParamValue::Map(value.clone()));
        self
    }
}

/// Build the statements that write one fragment, nodes first
///
/// # Errors
///
/// Returns `SinkError::Rejected` when a label or relationship type is empty
/// after quoting.
pub fn fragment_statements(fragment: &GraphFragment) -> Result<Vec<CypherStatement>, SinkError> {
    let mut statements = Vec::with_capacity(fragment.nodes.len() + fragment.relationships.len());

    for node in &fragment.nodes {
        statements.push(node_statement(node)?);
    }
    for rel in &fragment.relationships {
        statements.push(relationship_statement(rel)?);
    }

    Ok(statements)
}

fn node_statement(node: &GraphNode) -> Result<CypherStatement, SinkError> {
    let label = quote_identifier(&node.node_type)?;
    Ok(
        CypherStatement::new(format!("MERGE (n:{} {{id: $id}}) SET n += $props", label))
            .text_param("id", &node.id)
            .map_param("props", &node.properties),
    )
}

fn relationship_statement(rel: &GraphRelationship) -> Result<CypherStatement, SinkError> {
    let source_label = quote_identifier(&rel.source.node_type)?;
    let target_label = quote_identifier(&rel.target.node_type)?;
    let rel_type = quote_identifier(&rel.rel_type)?;

    let text = format!(
        "MERGE (s:{} {{id: $source_id}}) SET s += $source_props \
         MERGE (t:{} {{id: $target_id}}) SET t += $target_props \
         MERGE (s)-[r:{}]->(t) SET r += $props",
        source_label, target_label, rel_type
    );

    Ok(CypherStatement::new(text)
        .text_param("source_id", &rel.source.id)
        .map_param("source_props", &rel.source.properties)
        .text_param("target_id", &rel.target.id)
        .map_param("target_props", &rel.target.properties)
        .map_param("props", &rel.properties))
}

/// Quote a label or relationship type for inlining
pub fn quote_identifier(raw: &str) -> Result<String, SinkError> {
    let cleaned: String = raw.chars().filter(|c| *c != '`').collect();
    if cleaned.trim().is_empty() {
        return Err(SinkError::Rejected(format!("invalid label or type '{}'", raw)));
    }
    Ok(format!("`{}`", cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsmith_domain::{normalize_node, normalize_relationship, CandidateNode, CandidateRelationship, Document};

    fn fragment() -> GraphFragment {
        let alice = CandidateNode::new("alice", "user");
        let question = CandidateNode::new("datetime question", "question");
        GraphFragment {
            nodes: vec![normalize_node(&alice), normalize_node(&question)],
            relationships: vec![normalize_relationship(&CandidateRelationship::new(
                alice, question, "ASKS",
            ))],
            source: Document::new("User Alice asked how to serialize datetime in Python."),
        }
    }

    #[test]
    fn test_nodes_before_relationships() {
        let statements = fragment_statements(&fragment()).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].text.starts_with("MERGE (n:`User` {id: $id})"));
        assert!(statements[1].text.starts_with("MERGE (n:`Question` {id: $id})"));
        assert!(statements[2].text.contains("MERGE (s)-[r:`ASKS`]->(t)"));
    }

    #[test]
    fn test_node_params() {
        let statements = fragment_statements(&fragment()).unwrap();
        assert_eq!(
            statements[0].params["id"],
            ParamValue::Text("Alice".to_string())
        );
        match &statements[0].params["props"] {
            ParamValue::Map(props) => assert_eq!(props["name"], "Alice"),
            other => panic!("Expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_relationship_params() {
        let statements = fragment_statements(&fragment()).unwrap();
        let rel = &statements[2];
        assert_eq!(rel.params["source_id"], ParamValue::Text("Alice".to_string()));
        assert_eq!(
            rel.params["target_id"],
            ParamValue::Text("Datetime Question".to_string())
        );
        assert!(rel.text.contains("(t:`Question` {id: $target_id})"));
    }

    #[test]
    fn test_backticks_are_stripped() {
        assert_eq!(quote_identifier("Us`er").unwrap(), "`User`");
        assert_eq!(quote_identifier("HAS_ANSWER").unwrap(), "`HAS_ANSWER`");
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(matches!(quote_identifier(""), Err(SinkError::Rejected(_))));
        assert!(matches!(quote_identifier("``"), Err(SinkError::Rejected(_))));
    }
}
