//! LLM prompt construction for graph extraction

use graphsmith_domain::SchemaDefinition;

/// Builds the system instructions and user prompt for one extraction
pub struct PromptBuilder<'a> {
    schema: &'a SchemaDefinition,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for the given schema
    pub fn new(schema: &'a SchemaDefinition) -> Self {
        Self { schema }
    }

    /// System instructions: the output shape and the allowed vocabulary
    pub fn system_instructions(&self) -> String {
        let mut system = String::from(EXTRACTION_INSTRUCTIONS);
        system.push_str("\n\n");

        system.push_str("Allowed node labels: ");
        system.push_str(&quoted_list(self.schema.node_labels()));
        system.push('\n');
        system.push_str("Allowed relationship types: ");
        system.push_str(&quoted_list(self.schema.relationship_types()));
        system.push('\n');
        system.push_str(&format!(
            "Property keys must use {}.\n",
            self.schema.property_key_convention()
        ));
        if !self.schema.allows_escaped_quotes() {
            system.push_str("Never use escaped single or double quotes within property values.\n");
        }

        system
    }

    /// User prompt carrying the document text
    pub fn build(&self, text: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str("Use the given format to extract information from the following input:\n");
        prompt.push_str("---\n");
        prompt.push_str(text);
        prompt.push_str("\n---\n\n");
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

fn quoted_list(items: &[String]) -> String {
    if items.is_empty() {
        return "any".to_string();
    }
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You extract information in structured formats to build a knowledge graph.

Nodes represent entities and concepts. Keep the graph simple and clear.

Labeling nodes:
- Use basic, elementary types for node labels. An entity representing a question is always labeled "question", never "pythonQuestion".
- Node ids are meaningful identifiers taken from the text (names, question ids), never integers you invent.

Numerical data:
- Attach numbers such as view counts or scores as properties of the node they describe. Never create nodes for numbers.
- Properties are key/value pairs.

Coreference:
- When an entity is mentioned several times under different names or pronouns, always use its most complete identifier.

Relationships:
- Only connect nodes that appear in the node list, using the same id and label."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{
  "nodes": [
    {"id": "identifier", "type": "label", "properties": [{"key": "camelCaseKey", "value": "text"}]}
  ],
  "rels": [
    {
      "source": {"id": "identifier", "type": "label"},
      "target": {"id": "identifier", "type": "label"},
      "type": "RELATIONSHIP_TYPE",
      "properties": []
    }
  ]
}

Tip: Make sure to answer in the correct format."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_lists_schema_vocabulary() {
        let schema = SchemaDefinition::stack_overflow();
        let system = PromptBuilder::new(&schema).system_instructions();
        assert!(system.contains("\"technicalConcept\""));
        assert!(system.contains("\"HAS_ANSWER\""));
        assert!(system.contains("camelCase"));
        assert!(system.contains("escaped single or double quotes"));
    }

    #[test]
    fn test_unconstrained_schema_allows_any() {
        let schema = SchemaDefinition::unconstrained();
        let system = PromptBuilder::new(&schema).system_instructions();
        assert!(system.contains("Allowed node labels: any"));
        assert!(system.contains("Allowed relationship types: any"));
    }

    #[test]
    fn test_prompt_includes_text_and_shape() {
        let schema = SchemaDefinition::stack_overflow();
        let prompt = PromptBuilder::new(&schema).build("User Alice asked how to serialize datetime.");
        assert!(prompt.contains("User Alice asked how to serialize datetime."));
        assert!(prompt.contains("\"nodes\""));
        assert!(prompt.contains("\"rels\""));
    }
}
