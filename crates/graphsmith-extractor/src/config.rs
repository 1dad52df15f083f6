//! Configuration for the Extractor and the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (bytes)
    pub max_text_length: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum time for committing one fragment (seconds)
    pub sink_timeout_secs: u64,

    /// Reject responses that use labels outside the schema or reference
    /// nodes missing from the node list
    pub enforce_schema: bool,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Get the sink timeout as a Duration
    pub fn sink_timeout(&self) -> Duration {
        Duration::from_secs(self.sink_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.sink_timeout_secs == 0 {
            return Err("sink_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            extraction_timeout_secs: 120,
            sink_timeout_secs: 60,
            enforce_schema: true,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: short timeouts and small inputs
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            extraction_timeout_secs: 60,
            sink_timeout_secs: 30,
            enforce_schema: true,
        }
    }

    /// Lenient preset: long timeouts, large inputs, unchecked labels
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            extraction_timeout_secs: 300,
            sink_timeout_secs: 120,
            enforce_schema: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
