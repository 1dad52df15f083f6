//! Options and report types for ingestion runs

use crate::error::IngestError;
use graphsmith_domain::Document;
use std::ops::Range;

/// Caller-supplied options for one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Half-open range of document indices to process; `None` processes all
    pub window: Option<Range<usize>>,
}

impl IngestOptions {
    /// Process only the documents in `window`
    pub fn window(window: Range<usize>) -> Self {
        Self {
            window: Some(window),
        }
    }

    /// Resolve the window against a sequence of `len` documents
    ///
    /// A window past the end is clamped; an inverted window is empty.
    pub fn resolve(&self, len: usize) -> Range<usize> {
        match &self.window {
            None => 0..len,
            Some(range) => {
                let end = range.end.min(len);
                let start = range.start.min(end);
                start..end
            }
        }
    }
}

/// One document that did not make it into the graph
#[derive(Debug, Clone)]
pub struct IngestionFailure {
    /// Position of the document in the full input sequence
    pub index: usize,

    /// The document itself
    pub document: Document,

    /// What went wrong
    pub error: IngestError,
}

/// Outcome of an ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestionReport {
    /// Documents attempted
    pub processed: usize,

    /// Documents whose fragment was committed
    pub succeeded: usize,

    /// Documents that failed at extraction or at the sink
    pub failed: usize,

    /// Nodes in committed fragments
    pub nodes_committed: usize,

    /// Relationships in committed fragments
    pub relationships_committed: usize,

    /// Failures in input order
    pub failures: Vec<IngestionFailure>,

    /// Name of the model used for extraction
    pub model_name: String,

    /// Wall-clock time of the run in milliseconds
    pub processing_time_ms: u64,
}

impl IngestionReport {
    /// True when every processed document was committed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Failures that happened during extraction
    pub fn extraction_failures(&self) -> impl Iterator<Item = &IngestionFailure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.error, IngestError::Extraction(_)))
    }

    /// Failures that happened at the sink
    pub fn sink_failures(&self) -> impl Iterator<Item = &IngestionFailure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.error, IngestError::Sink(_)))
    }
}
