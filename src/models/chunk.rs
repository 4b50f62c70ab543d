// file: src/models/chunk.rs
// description: stored chunk model as returned by collection peeks
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyChunk {
    pub id: String,
    pub content: String,
    pub source: Option<String>,
    pub ingested_at: u64,
}

impl PolicyChunk {
    /// Build a chunk the way the loading pipeline does: the id is the
    /// sha256 of the content.
    pub fn new(content: String, source: Option<String>) -> Self {
        let id = Self::compute_hash(&content);
        let ingested_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            id,
            content,
            source,
            ingested_at,
        }
    }

    /// Reconstruct a chunk from stored columns, trusting the stored id.
    pub fn from_stored(id: String, content: String, source: Option<String>, ingested_at: u64) -> Self {
        Self {
            id,
            content,
            source,
            ingested_at,
        }
    }

    pub fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_creation() {
        let chunk = PolicyChunk::new(
            "Missed connections are covered up to 4 hours.".to_string(),
            Some("guarantee.md".to_string()),
        );

        assert!(!chunk.id.is_empty());
        assert_eq!(chunk.source_label(), "guarantee.md");
        assert!(chunk.ingested_at > 0);
    }

    #[test]
    fn test_hash_consistency() {
        let content = "EU261 compensation applies to departures from the EU.";
        let hash1 = PolicyChunk::compute_hash(content);
        let hash2 = PolicyChunk::compute_hash(content);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_missing_source_label() {
        let chunk = PolicyChunk::new("orphan chunk".to_string(), None);
        assert_eq!(chunk.source_label(), "unknown");
    }
}
