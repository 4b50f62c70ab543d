// file: src/store/embeddings.rs
// description: query embedding via an OpenAI-compatible endpoint with deterministic fallback
// reference: https://console.groq.com/docs/embeddings

use crate::config::StoreConfig;
use crate::error::{ProbeError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl EmbeddingClient {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            input: vec![text.to_string()],
            model: self.model.clone(),
        };

        debug!(
            "Requesting embedding from {} for {} chars",
            self.endpoint,
            text.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProbeError::Embedding(format!("Failed to send embedding request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProbeError::Embedding(format!(
                "Embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        match embedding_response.data.into_iter().next() {
            Some(data) => {
                debug!("Received embedding of dimension {}", data.embedding.len());
                Ok(data.embedding)
            }
            None => Err(ProbeError::Embedding(
                "No embedding data in response".to_string(),
            )),
        }
    }

    /// Deterministic hash-derived embedding used when no endpoint is
    /// reachable. Only useful against stores populated the same way.
    pub fn fallback_embedding(text: &str, dim: usize) -> Vec<f32> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
        (0..dim)
            .map(|i| (hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0)
            .collect()
    }
}

/// Decides per query whether to call the endpoint or fall back, so the
/// callers never deal with embedding failures themselves.
pub struct QueryEmbedder {
    client: Option<EmbeddingClient>,
    dim: usize,
}

impl QueryEmbedder {
    pub fn from_config(config: &StoreConfig) -> Self {
        let client = config.embedding_api_key.as_ref().map(|key| {
            EmbeddingClient::new(
                config.embedding_endpoint.clone(),
                key.clone(),
                config.embedding_model.clone(),
            )
        });

        if client.is_some() {
            debug!("Query embedder using remote endpoint");
        } else {
            warn!("No embedding API key configured, queries will use fallback embeddings");
        }

        Self {
            client,
            dim: config.embedding_dim,
        }
    }

    pub async fn embed(&self, text: &str) -> Vec<f32> {
        if let Some(ref client) = self.client {
            match client.generate_embedding(text).await {
                Ok(embedding) if embedding.len() == self.dim => return embedding,
                Ok(embedding) => {
                    warn!(
                        "Endpoint returned embedding of dimension {}, expected {}. Using fallback.",
                        embedding.len(),
                        self.dim
                    );
                }
                Err(e) => {
                    warn!("Embedding request failed: {}. Using fallback.", e);
                }
            }
        }

        EmbeddingClient::fallback_embedding(text, self.dim)
    }
}
