// file: src/exporter/json.rs
// description: json export of verification reports
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::verify::VerifyReport;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: String,
    pub probe_version: &'static str,
    pub report: &'a VerifyReport,
}

impl ReportExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn write(&self, report: &VerifyReport, pretty: bool) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let envelope = ReportEnvelope {
            generated_at: Utc::now().to_rfc3339(),
            probe_version: env!("CARGO_PKG_VERSION"),
            report,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&envelope)?
        } else {
            serde_json::to_string(&envelope)?
        };

        fs::write(&self.output_path, json)?;
        info!("Report written to {}", self.output_path.display());

        Ok(())
    }
}
