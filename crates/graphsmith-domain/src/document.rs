//! Document module - the unit of ingestion

use std::collections::BTreeMap;

/// Metadata key naming the origin of a document (file path, URL, ...)
pub const META_SOURCE: &str = "source";

/// Metadata key holding the 0-based record index within the source
pub const META_ROW: &str = "row";

/// Metadata key holding the 0-based chunk index within a record
pub const META_CHUNK: &str = "chunk";

/// A segment of source text handed to the extractor
///
/// Documents are immutable once produced by a source. One document yields
/// at most one graph fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Text to extract entities from
    pub content: String,

    /// Free-form metadata supplied by the source
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a document with no metadata
    ///
    /// # Examples
    ///
    /// ```
    /// use graphsmith_domain::Document;
    ///
    /// let doc = Document::new("Alice asked a question.")
    ///     .with_metadata("source", "posts.csv");
    /// assert_eq!(doc.metadata_value("source"), Some("posts.csv"));
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata value
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Short human-readable reference used in logs and reports
    ///
    /// Falls back to the first characters of the content when the source did
    /// not record an origin.
    pub fn reference(&self) -> String {
        match (self.metadata_value(META_SOURCE), self.metadata_value(META_ROW)) {
            (Some(source), Some(row)) => match self.metadata_value(META_CHUNK) {
                Some(chunk) => format!("{}#{}.{}", source, row, chunk),
                None => format!("{}#{}", source, row),
            },
            (Some(source), None) => source.to_string(),
            _ => {
                let preview: String = self.content.chars().take(32).collect();
                format!("\"{}\"", preview)
            }
        }
    }
}
