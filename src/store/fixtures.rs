// file: src/store/fixtures.rs
// description: test-only helpers that seed throwaway collections
// reference: https://docs.rs/lancedb

use crate::error::{ProbeError, Result};
use crate::models::PolicyChunk;
use crate::store::client::StoreClient;
use crate::store::embeddings::EmbeddingClient;
use crate::store::schema::collection_schema;
use arrow_array::{
    FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray, UInt64Array,
};
use std::sync::Arc;

/// Create the collection and load the given chunks, embedding each
/// content with the deterministic fallback so searches in tests hit
/// the same space.
pub async fn seed_collection(client: &StoreClient, chunks: &[PolicyChunk]) -> Result<()> {
    let dim = embedding_dim(client);
    let schema = collection_schema(dim);

    let embeddings: Vec<Vec<f32>> = chunks
        .iter()
        .map(|chunk| EmbeddingClient::fallback_embedding(&chunk.content, dim))
        .collect();

    let batch = chunks_to_batch(schema.clone(), chunks, &embeddings)?;

    client
        .connection()
        .create_table(
            client.collection(),
            RecordBatchIterator::new(vec![Ok(batch)], schema),
        )
        .execute()
        .await
        .map_err(|e| ProbeError::Store(format!("Failed to create test collection: {}", e)))?;

    Ok(())
}

/// Create the collection with the right schema but no rows.
pub async fn create_empty_collection(client: &StoreClient) -> Result<()> {
    let schema = collection_schema(embedding_dim(client));

    client
        .connection()
        .create_empty_table(client.collection(), schema)
        .execute()
        .await
        .map_err(|e| ProbeError::Store(format!("Failed to create empty collection: {}", e)))?;

    Ok(())
}

fn embedding_dim(client: &StoreClient) -> usize {
    client.store_config().embedding_dim
}

fn chunks_to_batch(
    schema: Arc<arrow_schema::Schema>,
    chunks: &[PolicyChunk],
    embeddings: &[Vec<f32>],
) -> Result<RecordBatch> {
    let ids: StringArray = chunks.iter().map(|c| Some(c.id.clone())).collect();
    let contents: StringArray = chunks.iter().map(|c| Some(c.content.clone())).collect();
    let sources: StringArray = chunks.iter().map(|c| c.source.clone()).collect();
    let ingested_ats: UInt64Array = chunks.iter().map(|c| Some(c.ingested_at)).collect();

    let embedding_values: Float32Array = embeddings
        .iter()
        .flat_map(|emb| emb.iter().copied())
        .collect();

    let embedding_list =
        FixedSizeListArray::try_new_from_values(embedding_values, embeddings[0].len() as i32)
            .map_err(|e| ProbeError::Store(format!("Failed to build embedding array: {}", e)))?;

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(ids),
            Arc::new(contents),
            Arc::new(sources),
            Arc::new(ingested_ats),
            Arc::new(embedding_list),
        ],
    )
    .map_err(|e| ProbeError::Store(format!("Failed to build record batch: {}", e)))
}
