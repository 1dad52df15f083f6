//! Parse LLM output into a candidate graph

use crate::error::ExtractionError;
use graphsmith_domain::{CandidateGraph, CandidateNode, CandidateRelationship, Property};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    #[serde(alias = "relationships")]
    rels: Vec<RawRelationship>,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(deserialize_with = "scalar_string")]
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    properties: Option<Vec<RawProperty>>,
}

#[derive(Deserialize)]
struct RawRelationship {
    source: RawNode,
    target: RawNode,
    #[serde(rename = "type")]
    rel_type: String,
    #[serde(default)]
    properties: Option<Vec<RawProperty>>,
}

#[derive(Deserialize)]
struct RawProperty {
    key: String,
    #[serde(deserialize_with = "scalar_string")]
    value: String,
}

/// Accept strings, numbers and booleans as text
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, number or boolean, got {}",
            other
        ))),
    }
}

impl From<RawNode> for CandidateNode {
    fn from(raw: RawNode) -> Self {
        CandidateNode {
            id: raw.id,
            node_type: raw.node_type,
            properties: into_properties(raw.properties),
        }
    }
}

impl From<RawRelationship> for CandidateRelationship {
    fn from(raw: RawRelationship) -> Self {
        CandidateRelationship {
            source: raw.source.into(),
            target: raw.target.into(),
            rel_type: raw.rel_type,
            properties: into_properties(raw.properties),
        }
    }
}

fn into_properties(raw: Option<Vec<RawProperty>>) -> Vec<Property> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|p| Property::new(p.key, p.value))
        .collect()
}

/// Parse an LLM JSON response into a candidate graph
///
/// The whole response must have the graph shape; there is no partial
/// success.
pub fn parse_llm_response(response: &str) -> Result<CandidateGraph, ExtractionError> {
    let json_str = extract_json(response)?;
    let raw: RawGraph = serde_json::from_str(&json_str)?;

    Ok(CandidateGraph::new(
        raw.nodes.into_iter().map(Into::into).collect(),
        raw.rels.into_iter().map(Into::into).collect(),
    ))
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractionError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(ExtractionError::InvalidFormat("Empty response".to_string()));
    }

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractionError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line and a closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
