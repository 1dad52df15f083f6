//! Graphsmith Document Sources
//!
//! Turns raw records into the `Document` sequence the ingestion pipeline
//! consumes.
//!
//! - `CsvSource`: one document per CSV record, `header: value` lines
//! - `TextChunker`: splits long records into overlapping chunks sized in
//!   approximate tokens

#![warn(missing_docs)]

mod chunking;
mod csv_source;
mod error;

pub use chunking::{ChunkingConfig, TextChunker, CHARS_PER_TOKEN};
pub use csv_source::CsvSource;
pub use error::SourceError;
