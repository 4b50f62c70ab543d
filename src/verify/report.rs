// file: src/verify/report.rs
// description: structured verification outcome and human-readable rendering
// reference: internal data structures

use crate::config::VerifyConfig;
use crate::models::{PolicyChunk, QueryMatch};
use crate::utils::display;
use serde::Serialize;

/// How the chunk count compares against what a full load produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountAssessment {
    Empty,
    Low,
    Adequate,
}

impl CountAssessment {
    pub fn from_count(count: u64, expected_min: u64) -> Self {
        if count == 0 {
            CountAssessment::Empty
        } else if count < expected_min {
            CountAssessment::Low
        } else {
            CountAssessment::Adequate
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryRun {
    pub question: String,
    pub matches: Vec<QueryMatch>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyOutcome {
    Passed,
    EmptyCollection,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub store_uri: String,
    pub collection: String,
    pub chunk_count: Option<u64>,
    pub assessment: Option<CountAssessment>,
    pub samples: Vec<PolicyChunk>,
    pub query_runs: Vec<QueryRun>,
    pub outcome: VerifyOutcome,
}

impl VerifyReport {
    pub fn failed(store_uri: &str, collection: &str, reason: String) -> Self {
        Self {
            store_uri: store_uri.to_string(),
            collection: collection.to_string(),
            chunk_count: None,
            assessment: None,
            samples: Vec::new(),
            query_runs: Vec::new(),
            outcome: VerifyOutcome::Failed { reason },
        }
    }

    pub fn empty_collection(store_uri: &str, collection: &str) -> Self {
        Self {
            store_uri: store_uri.to_string(),
            collection: collection.to_string(),
            chunk_count: Some(0),
            assessment: Some(CountAssessment::Empty),
            samples: Vec::new(),
            query_runs: Vec::new(),
            outcome: VerifyOutcome::EmptyCollection,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.outcome, VerifyOutcome::Passed)
    }

    /// Full human-readable rendition: banner, numbered steps, sampled
    /// chunks, test-query results, then a summary or troubleshooting
    /// block depending on the outcome.
    pub fn render(&self, config: &VerifyConfig) -> String {
        let mut out = String::new();

        out.push_str(&display::banner("STORE VERIFICATION"));
        out.push('\n');

        if let VerifyOutcome::Failed { reason } = &self.outcome {
            out.push('\n');
            out.push_str(&display::fail(&format!("ERROR: {}", reason)));
            out.push('\n');
            self.render_troubleshooting(&mut out);
            return out;
        }

        out.push('\n');
        out.push_str(&display::step(
            1,
            &format!("Connecting to store at: {}", self.store_uri),
        ));
        out.push('\n');
        out.push_str(&display::ok("Connected"));
        out.push('\n');

        out.push_str(&display::step(
            2,
            &format!("Opening collection: {}", self.collection),
        ));
        out.push('\n');
        out.push_str(&display::ok("Collection found"));
        out.push('\n');

        let count = self.chunk_count.unwrap_or(0);
        out.push_str(&display::step(3, &format!("Chunk count: {}", count)));
        out.push('\n');

        match self.assessment {
            Some(CountAssessment::Empty) => {
                out.push_str(&display::fail("ERROR: Collection is empty!"));
                out.push('\n');
                out.push_str(&display::hint("Re-run the document loading flow"));
                out.push('\n');
                return out;
            }
            Some(CountAssessment::Low) => {
                out.push_str(&display::warn(&format!(
                    "Count seems low (expected at least {} chunks)",
                    config.expected_min_chunks
                )));
                out.push('\n');
                out.push_str(&display::hint("Check that every policy file was loaded"));
                out.push('\n');
            }
            _ => {
                out.push_str(&display::ok("Chunk count looks good"));
                out.push('\n');
            }
        }

        self.render_samples(&mut out, config);
        self.render_query_runs(&mut out, config);
        self.render_summary(&mut out);

        out
    }

    fn render_samples(&self, out: &mut String, config: &VerifyConfig) {
        out.push_str(&display::step(
            4,
            &format!("Sample chunks (first {}):", self.samples.len()),
        ));
        out.push('\n');

        for (i, chunk) in self.samples.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("   --- Chunk {} ---\n", i + 1));
            out.push_str(&format!(
                "   {}\n",
                display::truncate(&chunk.content, config.sample_preview_chars)
            ));
            out.push_str(&format!("   Source: {}\n", chunk.source_label()));
        }
    }

    fn render_query_runs(&self, out: &mut String, config: &VerifyConfig) {
        out.push('\n');
        out.push_str(&display::banner("TEST QUERIES"));
        out.push('\n');

        for (i, run) in self.query_runs.iter().enumerate() {
            out.push('\n');
            out.push_str(&display::step(i + 1, &format!("Query: {}", run.question)));
            out.push('\n');
            out.push_str(&format!("   Retrieved {} results:\n", run.matches.len()));

            for (j, hit) in run.matches.iter().enumerate() {
                out.push('\n');
                out.push_str(&format!("   Result {}:\n", j + 1));
                out.push_str(&format!(
                    "   {}\n",
                    display::truncate(&hit.content, config.result_preview_chars)
                ));
                out.push_str(&format!("   Source: {}\n", hit.source_label()));

                if let Some(distance) = hit.distance {
                    out.push_str(&format!(
                        "   Distance: {:.4} (lower = more relevant)\n",
                        distance
                    ));
                }
            }
        }
    }

    fn render_summary(&self, out: &mut String) {
        out.push('\n');
        out.push_str(&display::banner("VERIFICATION SUMMARY"));
        out.push('\n');
        out.push_str(&display::ok(&format!(
            "Collection exists: {}",
            self.collection
        )));
        out.push('\n');
        out.push_str(&display::ok(&format!(
            "Total chunks indexed: {}",
            self.chunk_count.unwrap_or(0)
        )));
        out.push('\n');
        out.push_str(&display::ok("Query retrieval working: yes"));
        out.push('\n');
        out.push_str("\nStore looks good.\n");
        out.push_str("\nNext steps:\n");
        out.push_str("- Ask ad-hoc questions with the query subcommand\n");
        out.push_str("- Check answers against the policy documents\n");
        out.push_str("- Re-chunk or raise the result limit if retrieval quality is poor\n");
    }

    fn render_troubleshooting(&self, out: &mut String) {
        out.push_str("\nTroubleshooting:\n");
        out.push_str(&format!(
            "- Check the store uri is correct (currently: {})\n",
            self.store_uri
        ));
        out.push_str("- Make sure the document loading flow was run\n");
        out.push_str(&format!(
            "- Verify the collection name matches the loading flow (currently: {})\n",
            self.collection
        ));
        out.push_str(&format!(
            "- Try deleting {} and re-indexing\n",
            self.store_uri
        ));
        out.push_str("- Distances are only meaningful when the query embedder matches the one used at load time\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn sample_report() -> VerifyReport {
        VerifyReport {
            store_uri: "data/policy_store".to_string(),
            collection: "travel_policies".to_string(),
            chunk_count: Some(52),
            assessment: Some(CountAssessment::Adequate),
            samples: vec![PolicyChunk::new(
                "The guarantee covers rebooking.".to_string(),
                Some("guarantee.md".to_string()),
            )],
            query_runs: vec![QueryRun {
                question: "What does the guarantee cover?".to_string(),
                matches: vec![QueryMatch::new(
                    "id1".to_string(),
                    "Rebooking on the next available flight.".to_string(),
                    Some("guarantee.md".to_string()),
                    0.9,
                    Some(0.1111),
                )],
            }],
            outcome: VerifyOutcome::Passed,
        }
    }

    #[test]
    fn test_assessment_thresholds() {
        assert_eq!(CountAssessment::from_count(0, 40), CountAssessment::Empty);
        assert_eq!(CountAssessment::from_count(1, 40), CountAssessment::Low);
        assert_eq!(CountAssessment::from_count(39, 40), CountAssessment::Low);
        assert_eq!(
            CountAssessment::from_count(40, 40),
            CountAssessment::Adequate
        );
        assert_eq!(
            CountAssessment::from_count(500, 40),
            CountAssessment::Adequate
        );
    }

    #[test]
    fn test_render_passed_report() {
        colored::control::set_override(false);
        let config = Config::default_config();
        let rendered = sample_report().render(&config.verify);

        assert!(rendered.contains("STORE VERIFICATION"));
        assert!(rendered.contains("Chunk count: 52"));
        assert!(rendered.contains("Chunk count looks good"));
        assert!(!rendered.contains("Count seems low"));
        assert!(rendered.contains("Distance: 0.1111 (lower = more relevant)"));
        assert!(rendered.contains("VERIFICATION SUMMARY"));
    }

    #[test]
    fn test_render_low_count_warning() {
        colored::control::set_override(false);
        let config = Config::default_config();
        let mut report = sample_report();
        report.chunk_count = Some(12);
        report.assessment = Some(CountAssessment::Low);

        let rendered = report.render(&config.verify);
        assert!(rendered.contains("Count seems low (expected at least 40 chunks)"));
    }

    #[test]
    fn test_render_empty_collection_stops_early() {
        colored::control::set_override(false);
        let config = Config::default_config();
        let report = VerifyReport::empty_collection("data/policy_store", "travel_policies");

        let rendered = report.render(&config.verify);
        assert!(rendered.contains("Collection is empty"));
        assert!(!rendered.contains("TEST QUERIES"));
        assert!(!rendered.contains("VERIFICATION SUMMARY"));
    }

    #[test]
    fn test_render_failure_shows_troubleshooting() {
        colored::control::set_override(false);
        let config = Config::default_config();
        let report = VerifyReport::failed(
            "data/policy_store",
            "travel_policies",
            "Collection 'travel_policies' not found".to_string(),
        );

        let rendered = report.render(&config.verify);
        assert!(rendered.contains("ERROR: Collection 'travel_policies' not found"));
        assert!(rendered.contains("Troubleshooting:"));
        assert!(rendered.contains("re-indexing"));
        assert!(!rendered.contains("TEST QUERIES"));
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let report = sample_report();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome"]["status"], "passed");
        assert_eq!(value["chunk_count"], 52);
    }
}
