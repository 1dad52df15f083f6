//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::validator::check_conformance;
use graphsmith_domain::traits::LlmProvider;
use graphsmith_domain::{CandidateGraph, Document, SchemaDefinition};
use tokio::time::timeout;
use tracing::debug;

/// The Extractor turns one document into a candidate graph
///
/// Each call makes exactly one request to the provider; failures are
/// returned, never retried.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name of the model behind the provider
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Extract a candidate graph from one document
    ///
    /// # Errors
    ///
    /// - `TextTooLong` before any call when the content exceeds the byte limit
    /// - `Llm` when the provider fails
    /// - `Timeout` when the provider does not answer in time
    /// - `InvalidFormat` when the answer is not a candidate graph
    /// - `SchemaViolation` when schema enforcement is on and the graph
    ///   breaks the schema
    pub async fn extract(
        &self,
        document: &Document,
        schema: &SchemaDefinition,
    ) -> Result<CandidateGraph, ExtractionError> {
        if document.content.len() > self.config.max_text_length {
            return Err(ExtractionError::TextTooLong(
                document.content.len(),
                self.config.max_text_length,
            ));
        }

        let builder = PromptBuilder::new(schema);
        let system = builder.system_instructions();
        let prompt = builder.build(&document.content);

        debug!("Prompt length: {} chars", system.len() + prompt.len());

        let response = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.generate_structured(&system, &prompt),
        )
        .await
        .map_err(|_| ExtractionError::Timeout(self.config.extraction_timeout_secs))?
        .map_err(|e| ExtractionError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let graph = parse_llm_response(&response)?;

        if self.config.enforce_schema {
            let violations = check_conformance(&graph, schema);
            if !violations.is_empty() {
                let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
                return Err(ExtractionError::SchemaViolation(reasons.join("; ")));
            }
        }

        debug!(
            "Parsed {} nodes and {} relationships",
            graph.nodes.len(),
            graph.relationships.len()
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsmith_llm::MockProvider;
    use std::time::Duration;

    const GRAPH: &str = r#"{"nodes": [{"id": "alice", "type": "user"}], "rels": []}"#;

    #[tokio::test]
    async fn test_extract_single_call() {
        let llm = MockProvider::new(GRAPH);
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());

        let graph = extractor
            .extract(&Document::new("Alice"), &SchemaDefinition::stack_overflow())
            .await
            .unwrap();

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_text_too_long() {
        let llm = MockProvider::new(GRAPH);
        let mut config = ExtractorConfig::default();
        config.max_text_length = 10;
        let extractor = Extractor::new(llm.clone(), config);

        let result = extractor
            .extract(&Document::new("a".repeat(11)), &SchemaDefinition::stack_overflow())
            .await;

        assert!(matches!(result, Err(ExtractionError::TextTooLong(11, 10))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Text too long: 11 bytes (max: 10)"
        );
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_limit_counts_bytes() {
        let llm = MockProvider::new(GRAPH);
        let mut config = ExtractorConfig::default();
        config.max_text_length = 8;
        let extractor = Extractor::new(llm.clone(), config);

        // Three characters, nine bytes
        let result = extractor
            .extract(&Document::new("日本語"), &SchemaDefinition::stack_overflow())
            .await;

        assert!(matches!(result, Err(ExtractionError::TextTooLong(9, 8))));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let mut llm = MockProvider::new(GRAPH);
        llm.add_error("boom");
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());

        let result = extractor
            .extract(&Document::new("boom"), &SchemaDefinition::stack_overflow())
            .await;

        assert!(matches!(result, Err(ExtractionError::Llm(_))));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_timeout() {
        let llm = MockProvider::new(GRAPH).with_delay(Duration::from_secs(30));
        let mut config = ExtractorConfig::default();
        config.extraction_timeout_secs = 5;
        let extractor = Extractor::new(llm, config);

        let result = extractor
            .extract(&Document::new("slow"), &SchemaDefinition::stack_overflow())
            .await;

        assert_eq!(result, Err(ExtractionError::Timeout(5)));
    }

    #[tokio::test]
    async fn test_schema_violation_rejected() {
        let llm = MockProvider::new(r#"{"nodes": [{"id": "acme", "type": "company"}], "rels": []}"#);
        let extractor = Extractor::new(llm, ExtractorConfig::default());

        let result = extractor
            .extract(&Document::new("Acme"), &SchemaDefinition::stack_overflow())
            .await;

        match result {
            Err(ExtractionError::SchemaViolation(msg)) => assert!(msg.contains("company")),
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_schema_not_enforced_when_disabled() {
        let llm = MockProvider::new(r#"{"nodes": [{"id": "acme", "type": "company"}], "rels": []}"#);
        let mut config = ExtractorConfig::default();
        config.enforce_schema = false;
        let extractor = Extractor::new(llm, config);

        let graph = extractor
            .extract(&Document::new("Acme"), &SchemaDefinition::stack_overflow())
            .await
            .unwrap();

        assert_eq!(graph.nodes[0].node_type, "company");
    }
}
