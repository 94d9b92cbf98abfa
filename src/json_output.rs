//! JSON output format for analytics reports

use crate::error::Result;
use crate::pipeline::AnalysisReport;
use serde::Serialize;

/// Top-level JSON document
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub format: &'static str,
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
}

impl<'a> JsonOutput<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            format: "procmine-json-v1",
            report,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
