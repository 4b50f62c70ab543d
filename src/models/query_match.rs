// file: src/models/query_match.rs
// description: semantic search hit with similarity score and raw distance
// reference: Used for vector similarity search results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Chunk id (content hash)
    pub id: String,

    /// Chunk text
    pub content: String,

    /// Source label, when the loading pipeline recorded one
    pub source: Option<String>,

    /// Similarity score (higher is more similar, typically 0.0-1.0)
    pub score: f32,

    /// Distance metric (lower is more similar)
    pub distance: Option<f32>,
}

impl QueryMatch {
    pub fn new(
        id: String,
        content: String,
        source: Option<String>,
        score: f32,
        distance: Option<f32>,
    ) -> Self {
        Self {
            id,
            content,
            source,
            score,
            distance,
        }
    }

    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_match_creation() {
        let hit = QueryMatch::new(
            "abc123".to_string(),
            "Refunds are issued within 7 days.".to_string(),
            Some("refunds.md".to_string()),
            0.95,
            Some(0.05),
        );

        assert_eq!(hit.score, 0.95);
        assert_eq!(hit.distance, Some(0.05));
        assert_eq!(hit.source_label(), "refunds.md");
    }

    #[test]
    fn test_missing_metadata() {
        let hit = QueryMatch::new("id".to_string(), "text".to_string(), None, 1.0, None);
        assert_eq!(hit.source_label(), "unknown");
        assert!(hit.distance.is_none());
    }
}
