//! Schema definition - the closed vocabulary extraction is constrained to

/// Naming convention required for property keys
pub const PROPERTY_KEY_CONVENTION: &str = "camelCase";

/// Node labels of the built-in Stack Overflow catalog
pub const STACK_OVERFLOW_NODE_LABELS: &[&str] = &[
    "question",
    "answer",
    "user",
    "tag",
    "title",
    "technicalConcept",
    "function",
    "method",
    "class",
    "module",
];

/// Relationship types of the built-in Stack Overflow catalog
pub const STACK_OVERFLOW_RELATIONSHIP_TYPES: &[&str] = &[
    "ASKS",
    "ANSWERS",
    "HAS_ANSWER",
    "TAGGED_WITH",
    "HAS_TITLE",
    "USES",
    "CONTAINS",
    "CALLS",
    "IMPORTS",
];

/// Allowed node labels and relationship types
///
/// An empty list leaves that category unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    node_labels: Vec<String>,
    relationship_types: Vec<String>,
}

impl SchemaDefinition {
    /// Create a schema from explicit label lists
    pub fn new<N, R>(node_labels: N, relationship_types: R) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            node_labels: node_labels.into_iter().map(Into::into).collect(),
            relationship_types: relationship_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Schema that accepts any label and relationship type
    pub fn unconstrained() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }

    /// The catalog for Stack Overflow question/answer records
    ///
    /// # Examples
    ///
    /// ```
    /// use graphsmith_domain::SchemaDefinition;
    ///
    /// let schema = SchemaDefinition::stack_overflow();
    /// assert!(schema.allows_node_label("Question"));
    /// assert!(schema.allows_relationship_type("ASKS"));
    /// assert!(!schema.allows_relationship_type("LIKES"));
    /// ```
    pub fn stack_overflow() -> Self {
        Self::new(
            STACK_OVERFLOW_NODE_LABELS.iter().copied(),
            STACK_OVERFLOW_RELATIONSHIP_TYPES.iter().copied(),
        )
    }

    /// Allowed node labels
    pub fn node_labels(&self) -> &[String] {
        &self.node_labels
    }

    /// Allowed relationship types
    pub fn relationship_types(&self) -> &[String] {
        &self.relationship_types
    }

    /// Property key naming convention
    pub fn property_key_convention(&self) -> &'static str {
        PROPERTY_KEY_CONVENTION
    }

    /// Whether property values may contain escaped quotes (never)
    pub fn allows_escaped_quotes(&self) -> bool {
        false
    }

    /// Check a node label
    ///
    /// The first letter is compared case-insensitively, so a label the
    /// normalizer has capitalized still matches its catalog entry.
    pub fn allows_node_label(&self, label: &str) -> bool {
        self.node_labels.is_empty()
            || self
                .node_labels
                .iter()
                .any(|allowed| same_label(allowed, label))
    }

    /// Check a relationship type (exact match)
    pub fn allows_relationship_type(&self, rel_type: &str) -> bool {
        self.relationship_types.is_empty()
            || self.relationship_types.iter().any(|allowed| allowed == rel_type)
    }
}

impl Default for SchemaDefinition {
    fn default() -> Self {
        Self::stack_overflow()
    }
}

fn same_label(a: &str, b: &str) -> bool {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    match (a_chars.next(), b_chars.next()) {
        (Some(x), Some(y)) => {
            x.to_lowercase().eq(y.to_lowercase()) && a_chars.as_str() == b_chars.as_str()
        }
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_overflow_catalog() {
        let schema = SchemaDefinition::stack_overflow();
        assert_eq!(schema.node_labels().len(), 10);
        assert_eq!(schema.relationship_types().len(), 9);
        assert_eq!(schema.property_key_convention(), "camelCase");
        assert!(!schema.allows_escaped_quotes());
    }

    #[test]
    fn test_label_first_letter_case_insensitive() {
        let schema = SchemaDefinition::stack_overflow();
        assert!(schema.allows_node_label("technicalConcept"));
        assert!(schema.allows_node_label("TechnicalConcept"));
        assert!(!schema.allows_node_label("Technicalconcept"));
        assert!(!schema.allows_node_label("person"));
    }

    #[test]
    fn test_relationship_types_are_exact() {
        let schema = SchemaDefinition::stack_overflow();
        assert!(schema.allows_relationship_type("HAS_ANSWER"));
        assert!(!schema.allows_relationship_type("has_answer"));
    }

    #[test]
    fn test_unconstrained_accepts_anything() {
        let schema = SchemaDefinition::unconstrained();
        assert!(schema.allows_node_label("Anything"));
        assert!(schema.allows_relationship_type("WHATEVER"));
    }

    #[test]
    fn test_custom_schema() {
        let schema = SchemaDefinition::new(["person"], ["KNOWS"]);
        assert!(schema.allows_node_label("Person"));
        assert!(!schema.allows_node_label("question"));
        assert!(schema.allows_relationship_type("KNOWS"));
    }
}
