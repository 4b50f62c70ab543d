// file: src/store/client.rs
// description: LanceDB client wrapper with connection management
// reference: https://docs.rs/lancedb

use crate::config::StoreConfig;
use crate::error::{ProbeError, Result};
use crate::models::{PolicyChunk, QueryMatch};
use arrow_array::{Float32Array, RecordBatch, StringArray, UInt64Array};
use futures::StreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, Table, connect};
use tracing::{debug, info};

#[derive(Clone)]
pub struct StoreClient {
    connection: Connection,
    config: StoreConfig,
}

impl StoreClient {
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        info!("Connecting to vector store at {}", config.uri);

        let connection = connect(&config.uri)
            .execute()
            .await
            .map_err(|e| ProbeError::Store(format!("Failed to connect to store: {}", e)))?;

        Ok(Self { connection, config })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn collection(&self) -> &str {
        &self.config.collection
    }

    pub fn store_config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn ping(&self) -> Result<bool> {
        debug!("Checking store connection");

        match self.connection.table_names().execute().await {
            Ok(_) => {
                debug!("Store connection successful");
                Ok(true)
            }
            Err(e) => Err(ProbeError::Store(format!(
                "Store connection failed: {}",
                e
            ))),
        }
    }

    pub async fn collection_exists(&self) -> Result<bool> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| ProbeError::Store(format!("Failed to list collections: {}", e)))?;

        Ok(table_names.iter().any(|name| name == &self.config.collection))
    }

    /// A missing collection is an error here: the verifier has to tell
    /// "empty collection" apart from "collection was never created".
    pub async fn open_collection(&self) -> Result<Table> {
        if !self.collection_exists().await? {
            return Err(ProbeError::Store(format!(
                "Collection '{}' not found at {}",
                self.config.collection, self.config.uri
            )));
        }

        self.connection
            .open_table(&self.config.collection)
            .execute()
            .await
            .map_err(|e| {
                ProbeError::Store(format!(
                    "Failed to open collection {}: {}",
                    self.config.collection, e
                ))
            })
    }

    pub async fn chunk_count(&self) -> Result<u64> {
        let table = self.open_collection().await?;
        let count = table
            .count_rows(None)
            .await
            .map_err(|e| ProbeError::Store(format!("Failed to count chunks: {}", e)))?;

        Ok(count as u64)
    }

    /// Plain limited scan: a small arbitrary sample of stored chunks.
    pub async fn peek(&self, limit: usize) -> Result<Vec<PolicyChunk>> {
        let table = self.open_collection().await?;

        debug!("Peeking {} chunks from {}", limit, self.config.collection);

        let mut stream = table
            .query()
            .limit(limit)
            .execute()
            .await
            .map_err(|e| ProbeError::Store(format!("Peek query failed: {}", e)))?;

        let mut chunks = Vec::new();

        while let Some(batch_result) = stream.next().await {
            let batch = batch_result
                .map_err(|e| ProbeError::Store(format!("Failed to read peek batch: {}", e)))?;

            let ids = string_column(&batch, "id")?;
            let contents = string_column(&batch, "content")?;
            let sources = string_column(&batch, "source")?;
            let ingested_ats = u64_column(&batch, "ingested_at")?;

            for i in 0..batch.num_rows() {
                let source = if sources.is_null(i) {
                    None
                } else {
                    Some(sources.value(i).to_string())
                };

                chunks.push(PolicyChunk::from_stored(
                    ids.value(i).to_string(),
                    contents.value(i).to_string(),
                    source,
                    ingested_ats.value(i),
                ));
            }
        }

        debug!("Peek returned {} chunks", chunks.len());
        Ok(chunks)
    }

    /// Search the collection by vector similarity, closest first.
    pub async fn semantic_search(
        &self,
        query_embedding: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<QueryMatch>> {
        let table = self.open_collection().await?;

        info!("Running vector search with limit {}", limit);

        let query = table
            .vector_search(query_embedding)
            .map_err(|e| ProbeError::Store(format!("Failed to build vector search: {}", e)))?
            .limit(limit);

        let mut stream = query
            .execute()
            .await
            .map_err(|e| ProbeError::Store(format!("Vector search failed: {}", e)))?;

        let mut matches = Vec::new();

        while let Some(batch_result) = stream.next().await {
            let batch = batch_result
                .map_err(|e| ProbeError::Store(format!("Failed to read result batch: {}", e)))?;

            let ids = string_column(&batch, "id")?;
            let contents = string_column(&batch, "content")?;
            let sources = string_column(&batch, "source")?;

            // LanceDB reports the distance in a reserved column
            let distances = batch
                .column_by_name("_distance")
                .and_then(|col| col.as_any().downcast_ref::<Float32Array>());

            for i in 0..batch.num_rows() {
                let source = if sources.is_null(i) {
                    None
                } else {
                    Some(sources.value(i).to_string())
                };

                let (score, distance) = match distances {
                    Some(dist_array) if !dist_array.is_null(i) => {
                        let dist = dist_array.value(i);
                        (1.0 / (1.0 + dist), Some(dist))
                    }
                    _ => (1.0, None),
                };

                matches.push(QueryMatch::new(
                    ids.value(i).to_string(),
                    contents.value(i).to_string(),
                    source,
                    score,
                    distance,
                ));
            }
        }

        info!("Vector search returned {} matches", matches.len());
        Ok(matches)
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ProbeError::Store(format!("Missing '{}' column", name)))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ProbeError::Store(format!("Invalid '{}' column type", name)))
}

fn u64_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt64Array> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ProbeError::Store(format!("Missing '{}' column", name)))?
        .as_any()
        .downcast_ref::<UInt64Array>()
        .ok_or_else(|| ProbeError::Store(format!("Invalid '{}' column type", name)))
}
