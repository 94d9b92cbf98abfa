//! Error types for event-log analytics
//!
//! Structural problems in the input (unusable timestamps, blank case ids or
//! activity labels, missing columns)
//! abort the run. "No data" conditions are never errors; analyzers report
//! them as typed empty results instead.

use thiserror::Error;

/// Errors that can abort an analytics run
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error(
        "Invalid record at position {line}: case '{case_id}' has unusable timestamp '{raw_timestamp}'"
    )]
    InvalidRecord {
        case_id: String,
        raw_timestamp: String,
        line: usize,
    },

    #[error("Invalid record at position {line}: empty {field}")]
    EmptyField { field: &'static str, line: usize },

    #[error("Column '{column}' not found in event log header")]
    MissingColumn { column: String },

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
