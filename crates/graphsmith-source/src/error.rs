//! Error types for document sources

use thiserror::Error;

/// Errors that can occur while loading documents
#[derive(Error, Debug)]
pub enum SourceError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chunking parameters are unusable
    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),
}
