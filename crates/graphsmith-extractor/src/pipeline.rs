//! Sequential ingestion of a document sequence into a graph sink

use crate::extractor::Extractor;
use crate::error::IngestError;
use crate::types::{IngestOptions, IngestionFailure, IngestionReport};
use graphsmith_domain::traits::{GraphSink, LlmProvider};
use graphsmith_domain::{normalize_graph, Document, SchemaDefinition, SinkError};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives extraction, normalization and commit for each document in turn
///
/// One document's failure never stops the batch: it is recorded in the
/// report and the next document is processed.
pub struct IngestionPipeline<L>
where
    L: LlmProvider,
{
    extractor: Extractor<L>,
}

impl<L> IngestionPipeline<L>
where
    L: LlmProvider,
{
    /// Create a pipeline around an extractor
    pub fn new(extractor: Extractor<L>) -> Self {
        Self { extractor }
    }

    /// The extractor used for each document
    pub fn extractor(&self) -> &Extractor<L> {
        &self.extractor
    }

    /// Ingest every document
    pub async fn ingest<S>(
        &self,
        documents: &[Document],
        schema: &SchemaDefinition,
        sink: &S,
    ) -> IngestionReport
    where
        S: GraphSink + ?Sized,
    {
        self.ingest_with(documents, schema, sink, &IngestOptions::default())
            .await
    }

    /// Ingest the documents selected by `options`
    ///
    /// Failure indices refer to positions in `documents`, not in the window.
    pub async fn ingest_with<S>(
        &self,
        documents: &[Document],
        schema: &SchemaDefinition,
        sink: &S,
        options: &IngestOptions,
    ) -> IngestionReport
    where
        S: GraphSink + ?Sized,
    {
        let start = Instant::now();
        let range = options.resolve(documents.len());

        info!(
            "Ingesting documents {}..{} of {} with model {}",
            range.start,
            range.end,
            documents.len(),
            self.extractor.model_name()
        );

        let mut report = IngestionReport {
            model_name: self.extractor.model_name().to_string(),
            ..Default::default()
        };

        for (index, document) in documents.iter().enumerate().take(range.end).skip(range.start) {
            report.processed += 1;

            match self.ingest_one(document, schema, sink).await {
                Ok((nodes, relationships)) => {
                    debug!(
                        "Committed {} ({} nodes, {} relationships)",
                        document.reference(),
                        nodes,
                        relationships
                    );
                    report.succeeded += 1;
                    report.nodes_committed += nodes;
                    report.relationships_committed += relationships;
                }
                Err(error) => {
                    warn!(
                        "Document {} failed at {}: {}",
                        document.reference(),
                        error.stage(),
                        error
                    );
                    report.failed += 1;
                    report.failures.push(IngestionFailure {
                        index,
                        document: document.clone(),
                        error,
                    });
                }
            }
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Ingestion finished: {} processed, {} succeeded, {} failed in {}ms",
            report.processed, report.succeeded, report.failed, report.processing_time_ms
        );

        report
    }

    async fn ingest_one<S>(
        &self,
        document: &Document,
        schema: &SchemaDefinition,
        sink: &S,
    ) -> Result<(usize, usize), IngestError>
    where
        S: GraphSink + ?Sized,
    {
        let candidate = self.extractor.extract(document, schema).await?;
        let fragment = normalize_graph(&candidate, document.clone());
        let counts = (fragment.nodes.len(), fragment.relationships.len());

        let secs = self.extractor.config().sink_timeout_secs;
        timeout(self.extractor.config().sink_timeout(), sink.add(&fragment))
            .await
            .map_err(|_| SinkError::Timeout(secs))??;

        Ok(counts)
    }
}
