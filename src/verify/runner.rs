// file: src/verify/runner.rs
// description: verification routine and ad-hoc query entry points
// reference: application orchestration

use crate::config::Config;
use crate::error::Result;
use crate::models::QueryMatch;
use crate::store::{QueryEmbedder, StoreClient};
use crate::verify::report::{CountAssessment, QueryRun, VerifyOutcome, VerifyReport};
use tracing::{error, info};

/// Fixed retrieval smoke-test questions against the policy corpus.
pub const TEST_QUERIES: [&str; 4] = [
    "What does the guarantee cover for missed connections?",
    "What are EU261 compensation amounts?",
    "What is the refund policy for airline cancellations?",
    "How should we classify case urgency?",
];

pub struct Verifier {
    config: Config,
}

impl Verifier {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full verification. Every failure is folded into the
    /// report so the caller can render it and exit cleanly.
    pub async fn run(&self) -> VerifyReport {
        match self.run_inner().await {
            Ok(report) => report,
            Err(e) => {
                error!("Verification failed: {}", e);
                VerifyReport::failed(
                    &self.config.store.uri,
                    &self.config.store.collection,
                    e.to_string(),
                )
            }
        }
    }

    async fn run_inner(&self) -> Result<VerifyReport> {
        let store = &self.config.store;
        let verify = &self.config.verify;

        info!("Connecting to store at {}", store.uri);
        let client = StoreClient::connect(store.clone()).await?;
        client.ping().await?;

        info!("Opening collection {}", store.collection);
        let count = client.chunk_count().await?;
        info!("Collection holds {} chunks", count);

        if count == 0 {
            return Ok(VerifyReport::empty_collection(&store.uri, &store.collection));
        }

        let assessment = CountAssessment::from_count(count, verify.expected_min_chunks);

        let samples = client.peek(verify.sample_limit).await?;
        info!("Sampled {} chunks", samples.len());

        let embedder = QueryEmbedder::from_config(store);
        let mut query_runs = Vec::with_capacity(TEST_QUERIES.len());

        for question in TEST_QUERIES {
            info!("Test query: {}", question);
            let embedding = embedder.embed(question).await;
            let matches = client
                .semantic_search(embedding, verify.results_per_query)
                .await?;
            query_runs.push(QueryRun {
                question: question.to_string(),
                matches,
            });
        }

        Ok(VerifyReport {
            store_uri: store.uri.clone(),
            collection: store.collection.clone(),
            chunk_count: Some(count),
            assessment: Some(assessment),
            samples,
            query_runs,
            outcome: VerifyOutcome::Passed,
        })
    }
}

/// One caller-supplied question, results returned untrimmed. No input
/// validation and no recovery: errors bubble up to the caller.
pub async fn adhoc_query(config: &Config, query: &str, limit: usize) -> Result<Vec<QueryMatch>> {
    let client = StoreClient::connect(config.store.clone()).await?;

    let embedder = QueryEmbedder::from_config(&config.store);
    let embedding = embedder.embed(query).await;

    client.semantic_search(embedding, limit).await
}
