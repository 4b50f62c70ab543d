// file: src/store/mod.rs
// description: vector store access module exports
// reference: internal module structure

pub mod client;
pub mod embeddings;
pub mod schema;

#[cfg(test)]
pub mod fixtures;

pub use client::StoreClient;
pub use embeddings::{EmbeddingClient, QueryEmbedder};
