//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use graphsmith_domain::SchemaDefinition;
use graphsmith_extractor::IngestionReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest document preview shown in the failure table
const PREVIEW_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    json: bool,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(json: bool, color_enabled: bool) -> Self {
        Self {
            json,
            color_enabled,
        }
    }

    /// Format an ingestion report.
    pub fn format_report(&self, report: &IngestionReport) -> Result<String> {
        if self.json {
            self.format_report_json(report)
        } else {
            Ok(self.format_report_text(report))
        }
    }

    fn format_report_json(&self, report: &IngestionReport) -> Result<String> {
        let failures: Vec<serde_json::Value> = report
            .failures
            .iter()
            .map(|f| {
                serde_json::json!({
                    "index": f.index,
                    "document": f.document.reference(),
                    "stage": f.error.stage(),
                    "error": f.error.to_string(),
                })
            })
            .collect();

        let value = serde_json::json!({
            "processed": report.processed,
            "succeeded": report.succeeded,
            "failed": report.failed,
            "nodes_committed": report.nodes_committed,
            "relationships_committed": report.relationships_committed,
            "model": report.model_name,
            "processing_time_ms": report.processing_time_ms,
            "failures": failures,
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_report_text(&self, report: &IngestionReport) -> String {
        let summary = format!(
            "Processed {} document(s): {} succeeded, {} failed ({} nodes, {} relationships) in {}ms",
            report.processed,
            report.succeeded,
            report.failed,
            report.nodes_committed,
            report.relationships_committed,
            report.processing_time_ms
        );

        if report.failures.is_empty() {
            return self.success(&summary);
        }

        let mut builder = Builder::default();
        builder.push_record(["Index", "Stage", "Document", "Error"]);
        for failure in &report.failures {
            builder.push_record([
                failure.index.to_string(),
                failure.error.stage().to_string(),
                preview(&failure.document.reference()),
                failure.error.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", self.warning(&summary), table)
    }

    /// Format the schema.
    pub fn format_schema(&self, schema: &SchemaDefinition) -> Result<String> {
        if self.json {
            let value = serde_json::json!({
                "node_labels": schema.node_labels(),
                "relationship_types": schema.relationship_types(),
                "property_key_convention": schema.property_key_convention(),
                "escaped_quotes_allowed": schema.allows_escaped_quotes(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        Ok(format!(
            "Node labels: {}\nRelationship types: {}\nProperty keys: {}",
            list_or_any(schema.node_labels()),
            list_or_any(schema.relationship_types()),
            schema.property_key_convention()
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn list_or_any(items: &[String]) -> String {
    if items.is_empty() {
        "any".to_string()
    } else {
        items.join(", ")
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS - 1).collect();
    short.push('…');
    short
}
