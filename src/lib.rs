// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod store;
pub mod utils;
pub mod verify;

pub use config::{Config, StoreConfig, VerifyConfig};
pub use error::{ProbeError, Result};
pub use exporter::{ReportEnvelope, ReportExporter};
pub use models::{PolicyChunk, QueryMatch};
pub use store::{EmbeddingClient, QueryEmbedder, StoreClient};
pub use verify::{CountAssessment, QueryRun, TEST_QUERIES, Verifier, VerifyOutcome, VerifyReport, adhoc_query};
