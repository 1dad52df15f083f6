//! Neo4j graph sink
//!
//! Each fragment is written in its own transaction: either every node and
//! relationship of a document lands in the graph or none does.

use crate::cypher::{fragment_statements, CypherStatement, ParamValue};
use async_trait::async_trait;
use graphsmith_domain::traits::GraphSink;
use graphsmith_domain::{GraphFragment, SinkError};
use neo4rs::{query, Graph, Query};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Graph sink backed by a Neo4j database over Bolt
pub struct Neo4jGraphSink {
    graph: Graph,
}

impl Neo4jGraphSink {
    /// Connect to a Neo4j server
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Connection` if the server cannot be reached or
    /// rejects the credentials.
    pub async fn connect(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SinkError> {
        let url = url.into();
        let graph = Graph::new(url.clone(), username.into(), password.into())
            .await
            .map_err(|e| SinkError::Connection(format!("Failed to connect to {}: {}", url, e)))?;
        Ok(Self { graph })
    }
}

fn to_query(statement: CypherStatement) -> Query {
    statement
        .params
        .into_iter()
        .fold(query(&statement.text), |q, (key, value)| match value {
            ParamValue::Text(text) => q.param(&key, text),
            ParamValue::Map(map) => q.param(&key, map.into_iter().collect::<HashMap<String, String>>()),
        })
}

#[async_trait]
impl GraphSink for Neo4jGraphSink {
    async fn add(&self, fragment: &GraphFragment) -> Result<(), SinkError> {
        let queries: Vec<Query> = fragment_statements(fragment)?
            .into_iter()
            .map(to_query)
            .collect();

        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| SinkError::Connection(e.to_string()))?;

        if let Err(e) = txn.run_queries(queries).await {
            warn!(document = %fragment.source.reference(), "Rolling back fragment: {}", e);
            if let Err(rollback) = txn.rollback().await {
                warn!("Rollback failed: {}", rollback);
            }
            return Err(SinkError::Query(e.to_string()));
        }

        txn.commit()
            .await
            .map_err(|e| SinkError::Query(format!("Commit failed: {}", e)))?;

        debug!(
            document = %fragment.source.reference(),
            nodes = fragment.nodes.len(),
            relationships = fragment.relationships.len(),
            "Fragment committed to Neo4j"
        );

        Ok(())
    }
}
