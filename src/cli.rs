//! CLI argument parsing for procmine

use crate::config::AnalysisConfig;
use crate::csv_output::CsvTable;
use crate::ingest::ColumnMapping;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analytics reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis (one table, see --table)
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "procmine")]
#[command(version)]
#[command(about = "Activity timing, process variants and bottleneck transitions from an event log", long_about = None)]
pub struct Cli {
    /// Event log in CSV format (header row required)
    #[arg(value_name = "LOG")]
    pub log: PathBuf,

    /// Column holding the case identifier
    #[arg(long = "case-column", value_name = "NAME", default_value = "case_id")]
    pub case_column: String,

    /// Column holding the activity label
    #[arg(long = "activity-column", value_name = "NAME", default_value = "activity")]
    pub activity_column: String,

    /// Column holding the timestamp
    #[arg(long = "timestamp-column", value_name = "NAME", default_value = "timestamp")]
    pub timestamp_column: String,

    /// Analysis configuration file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum events per case (overrides config, default: 2)
    #[arg(long = "min-case-size", value_name = "N")]
    pub min_case_size: Option<usize>,

    /// Number of headline bottleneck transitions (overrides config, default: 5)
    #[arg(long = "top", value_name = "K")]
    pub top_k: Option<usize>,

    /// Run analyzers on worker threads
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Run analyzers sequentially even if the config enables threads
    #[arg(long = "no-parallel", conflicts_with = "parallel")]
    pub no_parallel: bool,

    /// Transition times from an external discovery tool (JSON) instead of measuring them
    #[arg(long = "transitions", value_name = "FILE")]
    pub transitions: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Table to export with --format csv
    #[arg(long = "table", value_enum, default_value = "activities")]
    pub table: CsvTable,

    /// Show cases and transitions of the variant at this rank (1 = most frequent)
    #[arg(long = "variant", value_name = "RANK")]
    pub variant: Option<usize>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping {
            case: self.case_column.clone(),
            activity: self.activity_column.clone(),
            timestamp: self.timestamp_column.clone(),
        }
    }

    /// Apply command-line overrides on top of `base`
    pub fn analysis_config(&self, base: AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            min_case_size: self.min_case_size.unwrap_or(base.min_case_size),
            top_k: self.top_k.unwrap_or(base.top_k),
            parallel: !self.no_parallel && (self.parallel || base.parallel),
        }
    }
}
