// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ProbeError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub uri: String,
    pub collection: String,
    pub embedding_dim: usize,
    pub embedding_endpoint: String,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    pub sample_limit: usize,
    pub results_per_query: usize,
    pub expected_min_chunks: u64,
    pub sample_preview_chars: usize,
    pub result_preview_chars: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("POLICY_PROBE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ProbeError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ProbeError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            store: StoreConfig {
                uri: "data/policy_store".to_string(),
                collection: "travel_policies".to_string(),
                embedding_dim: 768,
                embedding_endpoint: "https://api.groq.com/openai/v1/embeddings".to_string(),
                embedding_model: "openai/gpt-oss-120b".to_string(),
                embedding_api_key: None,
            },
            verify: VerifyConfig {
                sample_limit: 3,
                results_per_query: 3,
                expected_min_chunks: 40,
                sample_preview_chars: 200,
                result_preview_chars: 250,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.embedding_dim == 0 {
            return Err(ProbeError::Config(
                "embedding_dim must be greater than 0".to_string(),
            ));
        }

        if self.store.collection.trim().is_empty() {
            return Err(ProbeError::Config(
                "collection name must not be empty".to_string(),
            ));
        }

        if self.verify.sample_limit == 0 || self.verify.results_per_query == 0 {
            return Err(ProbeError::Config(
                "sample_limit and results_per_query must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.collection, "travel_policies");
        assert_eq!(config.store.embedding_dim, 768);
        assert_eq!(config.verify.expected_min_chunks, 40);
    }

    #[test]
    fn test_zero_dim_rejected() {
        let mut config = Config::default_config();
        config.store.embedding_dim = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = Config::default_config();
        config.verify.results_per_query = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.verify.sample_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_collection_rejected() {
        let mut config = Config::default_config();
        config.store.collection = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
