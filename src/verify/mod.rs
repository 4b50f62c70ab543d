// file: src/verify/mod.rs
// description: verification routine module exports
// reference: internal module structure

pub mod report;
pub mod runner;

pub use report::{CountAssessment, QueryRun, VerifyOutcome, VerifyReport};
pub use runner::{Verifier, adhoc_query, TEST_QUERIES};
