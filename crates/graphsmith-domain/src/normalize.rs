//! Normalization of candidate entities into canonical graph entities
//!
//! All functions here are pure and total. Applying them to output they
//! produced returns that output unchanged.

use crate::{
    CandidateGraph, CandidateNode, CandidateRelationship, Document, GraphFragment, GraphNode,
    GraphRelationship, Property,
};
use std::collections::BTreeMap;

/// Property key injected on every node, equal to the node id
pub const NAME_PROPERTY: &str = "name";

/// Normalize a candidate node
///
/// The id is title-cased and copied into the `name` property, which wins
/// over any extracted `name`. The type gets an upper-case first letter.
///
/// # Examples
///
/// ```
/// use graphsmith_domain::{normalize_node, CandidateNode};
///
/// let node = normalize_node(&CandidateNode::new("datetime question", "question"));
/// assert_eq!(node.id, "Datetime Question");
/// assert_eq!(node.node_type, "Question");
/// assert_eq!(node.properties["name"], "Datetime Question");
/// ```
pub fn normalize_node(node: &CandidateNode) -> GraphNode {
    let id = title_case(&node.id);
    let mut properties = props_to_map(&node.properties);
    properties.insert(NAME_PROPERTY.to_string(), id.clone());

    GraphNode {
        id,
        node_type: capitalize_label(&node.node_type),
        properties,
    }
}

/// Normalize a candidate relationship
///
/// Both endpoints follow the node rule; the relationship type is kept
/// verbatim.
pub fn normalize_relationship(rel: &CandidateRelationship) -> GraphRelationship {
    GraphRelationship {
        source: normalize_node(&rel.source),
        target: normalize_node(&rel.target),
        rel_type: rel.rel_type.clone(),
        properties: props_to_map(&rel.properties),
    }
}

/// Normalize a whole candidate graph into the fragment for `source`
///
/// Node order and relationship order follow the candidate graph.
pub fn normalize_graph(candidate: &CandidateGraph, source: Document) -> GraphFragment {
    GraphFragment {
        nodes: candidate.nodes.iter().map(normalize_node).collect(),
        relationships: candidate
            .relationships
            .iter()
            .map(normalize_relationship)
            .collect(),
        source,
    }
}

/// Format a property key as lower camel case
///
/// Multi-word keys have their first word lower-cased and every later word
/// capitalized. A single-word key only has its first letter lower-cased,
/// so an already camel-cased key passes through untouched, unless it is an
/// all-caps acronym, which is lower-cased whole like a leading word. A key
/// with no words is returned as is.
///
/// # Examples
///
/// ```
/// use graphsmith_domain::format_property_key;
///
/// assert_eq!(format_property_key("return type"), "returnType");
/// assert_eq!(format_property_key("returnType"), "returnType");
/// assert_eq!(format_property_key("URL"), "url");
/// assert_eq!(format_property_key(""), "");
/// ```
pub fn format_property_key(key: &str) -> String {
    let mut words = key.split_whitespace();
    let first = match words.next() {
        Some(first) => first,
        None => return key.to_string(),
    };
    let rest: Vec<&str> = words.collect();

    if rest.is_empty() {
        if is_acronym(first) {
            return first.to_lowercase();
        }
        return lowercase_first(first);
    }

    let mut formatted = first.to_lowercase();
    for word in rest {
        formatted.push_str(&capitalize_label(word));
    }
    formatted
}

/// Upper-case the first letter of every whitespace-delimited word
///
/// Whitespace is preserved and the remainder of each word is untouched.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Upper-case the first letter only
pub fn capitalize_label(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Starts with an upper-case letter and has no lower-case letters
fn is_acronym(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn props_to_map(props: &[Property]) -> BTreeMap<String, String> {
    props
        .iter()
        .map(|p| (format_property_key(&p.key), p.value.clone()))
        .collect()
}
