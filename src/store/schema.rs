// file: src/store/schema.rs
// description: Arrow schema expected of a policy chunk collection
// reference: https://docs.rs/lancedb

use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

/// Schema the loading pipeline writes and this tool reads back.
/// `source` is nullable: not every chunk carries a provenance label.
pub fn collection_schema(embedding_dim: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("content", DataType::Utf8, false),
        Field::new("source", DataType::Utf8, true),
        Field::new("ingested_at", DataType::UInt64, false),
        Field::new(
            "embedding",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                embedding_dim as i32,
            ),
            false,
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema = collection_schema(384);
        assert_eq!(schema.fields().len(), 5);

        let embedding_field = schema.field_with_name("embedding").unwrap();
        assert!(matches!(
            embedding_field.data_type(),
            DataType::FixedSizeList(_, 384)
        ));

        let source_field = schema.field_with_name("source").unwrap();
        assert!(source_field.is_nullable());
    }
}
