//! CSV export of analytics tables
//!
//! Each derived record collection is exported as a flat table: one row per
//! record, durations in hours rounded to two decimals. The header row is
//! always written, so an empty table is still a valid CSV document.

use crate::activity_timing::ActivityRow;
use crate::bottleneck::BottleneckRow;
use crate::error::Result;
use crate::event::CaseId;
use crate::pipeline::AnalysisReport;
use crate::stats::hours2;
use crate::variants::VariantRow;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Table selectable for CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CsvTable {
    /// Activity frequency and timing
    Activities,
    /// Process variants
    Variants,
    /// Ranked bottleneck transitions
    Bottlenecks,
    /// Per-case durations
    Cases,
}

/// A flat presentation row with a fixed header
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];
}

impl TableRow for ActivityRow {
    const HEADERS: &'static [&'static str] = &[
        "Activity",
        "Count",
        "Percentage (%)",
        "Min Duration (hours)",
        "Avg Duration (hours)",
        "Max Duration (hours)",
        "Sample Size",
    ];
}

impl TableRow for VariantRow {
    const HEADERS: &'static [&'static str] = &["Variant", "Count", "Avg Duration (hours)"];
}

impl TableRow for BottleneckRow {
    const HEADERS: &'static [&'static str] = &["From", "To", "Avg Time (hours)"];
}

/// Duration of one case, in hours
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRow {
    #[serde(rename = "Case ID")]
    pub case_id: CaseId,
    #[serde(rename = "Duration (hours)")]
    pub duration_hours: f64,
}

impl TableRow for CaseRow {
    const HEADERS: &'static [&'static str] = &["Case ID", "Duration (hours)"];
}

fn write_rows<W: Write, R: TableRow>(writer: W, rows: &[R]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(R::HEADERS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write one table of `report` as CSV
pub fn write_table<W: Write>(report: &AnalysisReport, table: CsvTable, writer: W) -> Result<()> {
    match table {
        CsvTable::Activities => write_rows(writer, &report.activities.rows()),
        CsvTable::Variants => write_rows(writer, &report.variants.rows()),
        CsvTable::Bottlenecks => {
            let rows = report
                .bottlenecks
                .ranking()
                .map(|ranking| ranking.rows())
                .unwrap_or_default();
            write_rows(writer, &rows)
        }
        CsvTable::Cases => {
            let rows: Vec<CaseRow> = report
                .case_durations
                .durations
                .iter()
                .map(|d| CaseRow {
                    case_id: d.case_id.clone(),
                    duration_hours: hours2(d.duration_secs),
                })
                .collect();
            write_rows(writer, &rows)
        }
    }
}

/// Render one table of `report` as a CSV string
pub fn to_csv(report: &AnalysisReport, table: CsvTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(report, table, &mut buffer)?;
    // csv output of UTF-8 input is UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
