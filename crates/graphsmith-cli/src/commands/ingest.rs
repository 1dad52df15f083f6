//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use graphsmith_domain::traits::{GraphSink, LlmProvider};
use graphsmith_extractor::{Extractor, IngestionPipeline, IngestionReport};
use graphsmith_llm::OpenAiProvider;
use graphsmith_source::{CsvSource, TextChunker};
use graphsmith_store::{MemoryGraphSink, Neo4jGraphSink};
use tracing::info;

/// Execute the ingest command.
pub async fn execute_ingest(
    args: IngestArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    config.validate_for_extraction()?;

    let llm = OpenAiProvider::with_timeout(
        config.llm.api_base.clone(),
        config.api_key()?,
        config.llm.model.clone(),
        config.http_timeout(),
    )?;

    let report = if args.dry_run {
        info!("Dry run: writing to an in-memory graph");
        let sink = MemoryGraphSink::new();
        let report = run_ingest(&args, config, llm, &sink).await?;
        info!(
            "In-memory graph holds {} nodes and {} relationships",
            sink.node_count(),
            sink.relationship_count()
        );
        report
    } else {
        let sink = Neo4jGraphSink::connect(
            config.neo4j.url.clone(),
            config.neo4j.username.clone(),
            config.neo4j_password()?,
        )
        .await?;
        run_ingest(&args, config, llm, &sink).await?
    };

    println!("{}", formatter.format_report(&report)?);

    Ok(())
}

/// Load the CSV named in `args` and ingest it into `sink`.
///
/// Only loading can fail here; per-document failures are in the report.
pub async fn run_ingest<L, S>(
    args: &IngestArgs,
    config: &AppConfig,
    llm: L,
    sink: &S,
) -> Result<IngestionReport>
where
    L: LlmProvider,
    S: GraphSink + ?Sized,
{
    let chunker = TextChunker::new(config.source)?;
    let documents = CsvSource::new(&args.csv).with_chunker(chunker).load()?;

    let pipeline = IngestionPipeline::new(Extractor::new(llm, config.extractor.clone()));
    let schema = config.schema_definition();

    Ok(pipeline
        .ingest_with(&documents, &schema, sink, &args.options())
        .await)
}
