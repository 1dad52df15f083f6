//! CSV document source

use crate::{SourceError, TextChunker};
use graphsmith_domain::document::{META_CHUNK, META_ROW, META_SOURCE};
use graphsmith_domain::Document;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads one document per CSV record
///
/// The first row is the header. A record becomes `header: value` lines in
/// column order, with `source` and `row` metadata. With a chunker attached,
/// long records become several documents that also carry `chunk`.
///
/// # Examples
///
/// ```
/// use graphsmith_source::CsvSource;
///
/// let data = "title,body\nDates,How to serialize datetime?\n";
/// let docs = CsvSource::from_reader(data.as_bytes(), "inline").unwrap();
/// assert_eq!(docs[0].content, "title: Dates\nbody: How to serialize datetime?");
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    chunker: Option<TextChunker>,
}

impl CsvSource {
    /// Create a source for a CSV file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            chunker: None,
        }
    }

    /// Split long records with the given chunker
    pub fn with_chunker(mut self, chunker: TextChunker) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Read every record of the file
    pub fn load(&self) -> Result<Vec<Document>, SourceError> {
        let file = std::fs::File::open(&self.path)?;
        let source_name = self.path.display().to_string();
        let records = read_records(file, &source_name)?;

        let documents = match &self.chunker {
            Some(chunker) => records
                .into_iter()
                .flat_map(|doc| split_document(doc, chunker))
                .collect::<Vec<_>>(),
            None => records,
        };

        info!("Loaded {} documents from {}", documents.len(), source_name);
        Ok(documents)
    }

    /// Read records from any reader without chunking
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<Document>, SourceError> {
        read_records(reader, source_name)
    }
}

fn read_records<R: Read>(reader: R, source_name: &str) -> Result<Vec<Document>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let content = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{}: {}", header.trim(), value.trim()))
            .collect::<Vec<_>>()
            .join("\n");

        documents.push(
            Document::new(content)
                .with_metadata(META_SOURCE, source_name)
                .with_metadata(META_ROW, row.to_string()),
        );
    }

    debug!("Read {} records from {}", documents.len(), source_name);
    Ok(documents)
}

fn split_document(document: Document, chunker: &TextChunker) -> Vec<Document> {
    let chunks = chunker.chunk(&document.content);
    if chunks.len() <= 1 {
        return vec![document];
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, content)| Document {
            content,
            metadata: document.metadata.clone(),
        }
        .with_metadata(META_CHUNK, idx.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkingConfig;
    use std::io::Write;

    const SAMPLE: &str = "\
question,answer,tags
\"How to overcome datetime not JSON serializable?\",Use a custom encoder,python;json
Reverse a list?,Use slicing,python
";

    #[test]
    fn test_from_reader_formats_records() {
        let docs = CsvSource::from_reader(SAMPLE.as_bytes(), "posts.csv").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[0].content,
            "question: How to overcome datetime not JSON serializable?\nanswer: Use a custom encoder\ntags: python;json"
        );
        assert_eq!(docs[1].metadata_value("row"), Some("1"));
        assert_eq!(docs[1].metadata_value("source"), Some("posts.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let docs = CsvSource::new(file.path()).load().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[0].metadata_value("source"),
            Some(file.path().display().to_string().as_str())
        );
    }

    #[test]
    fn test_long_records_are_chunked() {
        let body = "word ".repeat(200);
        let data = format!("body\n\"{}\"\nshort\n", body.trim());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();

        let chunker = TextChunker::new(ChunkingConfig {
            chunk_tokens: 64,
            overlap_tokens: 8,
        })
        .unwrap();
        let docs = CsvSource::new(file.path()).with_chunker(chunker).load().unwrap();

        assert!(docs.len() > 2);
        assert_eq!(docs[0].metadata_value("chunk"), Some("0"));
        assert_eq!(docs[0].metadata_value("row"), Some("0"));
        for doc in &docs[..docs.len() - 1] {
            assert!(doc
                .content
                .split_whitespace()
                .all(|w| w == "body:" || w == "word"));
        }
        let last = docs.last().unwrap();
        assert_eq!(last.content, "body: short");
        assert_eq!(last.metadata_value("chunk"), None);
    }

    #[test]
    fn test_missing_file() {
        let result = CsvSource::new("/nonexistent/graphsmith.csv").load();
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn test_ragged_record_is_error() {
        let data = "a,b\n1,2,3\n";
        let result = CsvSource::from_reader(data.as_bytes(), "bad");
        assert!(matches!(result, Err(SourceError::Csv(_))));
    }
}
