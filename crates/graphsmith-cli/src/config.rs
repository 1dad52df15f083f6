//! Configuration management for the CLI.
//!
//! Settings come from a TOML file (`--config`, or `~/.graphsmith/config.toml`
//! when present) and are then overridden from the environment. The result is
//! built once at startup and passed by reference to whatever needs it.

use crate::error::{CliError, Result};
use graphsmith_domain::SchemaDefinition;
use graphsmith_extractor::ExtractorConfig;
use graphsmith_llm::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use graphsmith_source::ChunkingConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Neo4j connection URL
pub const ENV_NEO4J_URL: &str = "NEO4J_URL";
/// Neo4j user name
pub const ENV_NEO4J_USERNAME: &str = "NEO4J_USERNAME";
/// Neo4j password
pub const ENV_NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";
/// LLM API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_SECRET_KEY";
/// LLM API base URL
pub const ENV_OPENAI_API_BASE: &str = "OPENAI_API_BASE";
/// LLM model name
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";

/// Extra time the HTTP client allows past the extraction timeout, so an
/// overdue call is reported as an extraction timeout
pub const HTTP_TIMEOUT_GRACE_SECS: u64 = 5;

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Graph store connection
    pub neo4j: Neo4jConfig,

    /// Structured-generation service
    pub llm: LlmConfig,

    /// Extraction limits and timeouts
    pub extractor: ExtractorConfig,

    /// Document chunking
    pub source: ChunkingConfig,

    /// Custom schema; the Stack Overflow catalog when absent
    pub schema: Option<SchemaConfig>,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt URL
    pub url: String,

    /// User name
    pub username: String,

    /// Password
    pub password: Option<String>,
}

/// LLM service settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    pub api_base: String,

    /// Model name
    pub model: String,
}

/// Allowed vocabulary for extraction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Allowed node labels; empty means any
    pub node_labels: Vec<String>,

    /// Allowed relationship types; empty means any
    pub relationship_types: Vec<String>,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            url: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".graphsmith").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Override settings from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override settings from any variable lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_NEO4J_URL) {
            self.neo4j.url = url;
        }
        if let Some(username) = get(ENV_NEO4J_USERNAME) {
            self.neo4j.username = username;
        }
        if let Some(password) = get(ENV_NEO4J_PASSWORD) {
            self.neo4j.password = Some(password);
        }
        if let Some(api_key) = get(ENV_OPENAI_API_KEY) {
            self.llm.api_key = Some(api_key);
        }
        if let Some(api_base) = get(ENV_OPENAI_API_BASE) {
            self.llm.api_base = api_base;
        }
        if let Some(model) = get(ENV_OPENAI_MODEL) {
            self.llm.model = model;
        }
    }

    /// Schema used to guide and check extraction.
    pub fn schema_definition(&self) -> SchemaDefinition {
        match &self.schema {
            Some(schema) => SchemaDefinition::new(
                schema.node_labels.clone(),
                schema.relationship_types.clone(),
            ),
            None => SchemaDefinition::stack_overflow(),
        }
    }

    /// Check everything an extraction run needs.
    pub fn validate_for_extraction(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        self.source
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("llm.model must not be empty".into()));
        }
        Ok(())
    }

    /// Request timeout for the LLM HTTP client.
    pub fn http_timeout(&self) -> Duration {
        self.extractor.extraction_timeout() + Duration::from_secs(HTTP_TIMEOUT_GRACE_SECS)
    }

    /// API key for the LLM service.
    pub fn api_key(&self) -> Result<&str> {
        self.llm.api_key.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "No LLM API key; set llm.api_key or {}",
                ENV_OPENAI_API_KEY
            ))
        })
    }

    /// Password for the graph store.
    pub fn neo4j_password(&self) -> Result<&str> {
        self.neo4j.password.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "No Neo4j password; set neo4j.password or {}",
                ENV_NEO4J_PASSWORD
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.neo4j.url, "bolt://localhost:7687");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!(config.extractor.enforce_schema);
        assert_eq!(config.schema_definition(), SchemaDefinition::stack_overflow());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[neo4j]
url = "bolt://graph:7687"
password = "secret"

[llm]
model = "gpt-4o-mini"

[extractor]
extraction_timeout_secs = 30

[source]
chunk_tokens = 128

[schema]
node_labels = ["Person"]
relationship_types = ["KNOWS"]
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.neo4j.url, "bolt://graph:7687");
        assert_eq!(config.neo4j.username, "neo4j");
        assert_eq!(config.neo4j_password().unwrap(), "secret");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_base, DEFAULT_API_BASE);
        assert_eq!(config.extractor.extraction_timeout_secs, 30);
        assert_eq!(config.extractor.sink_timeout_secs, 60);
        assert_eq!(config.source.chunk_tokens, 128);
        assert_eq!(config.source.overlap_tokens, 20);

        let schema = config.schema_definition();
        assert!(schema.allows_node_label("Person"));
        assert!(!schema.allows_node_label("Question"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[neo4j\nurl = ").unwrap();
        let result = AppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_NEO4J_URL, "bolt://env:7687"),
            (ENV_NEO4J_PASSWORD, "from-env"),
            (ENV_OPENAI_API_KEY, "sk-test"),
            (ENV_OPENAI_MODEL, ""),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.neo4j.url, "bolt://env:7687");
        assert_eq!(config.neo4j_password().unwrap(), "from-env");
        assert_eq!(config.api_key().unwrap(), "sk-test");
        // Empty values do not override
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_http_timeout_outlasts_extraction_timeout() {
        let mut config = AppConfig::default();
        config.extractor.extraction_timeout_secs = 30;
        assert_eq!(config.http_timeout(), Duration::from_secs(35));
        assert!(config.http_timeout() > config.extractor.extraction_timeout());
    }

    #[test]
    fn test_missing_credentials() {
        let config = AppConfig::default();
        assert!(matches!(config.api_key(), Err(CliError::Config(_))));
        assert!(matches!(config.neo4j_password(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_extractor_settings() {
        let mut config = AppConfig::default();
        assert!(config.validate_for_extraction().is_ok());

        config.extractor.extraction_timeout_secs = 0;
        assert!(matches!(
            config.validate_for_extraction(),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_empty_schema_section_is_unconstrained() {
        let config: AppConfig = toml::from_str("[schema]\n").unwrap();
        let schema = config.schema_definition();
        assert!(schema.allows_node_label("Anything"));
        assert!(schema.allows_relationship_type("WHATEVER"));
    }
}
