// Tabular record source for event logs
//
// Reads a CSV event log with a header row. Three user-selected columns
// provide case id, activity and timestamp; every other column is ignored.
// Timestamp text is normalized here; rows whose timestamp cannot be
// normalized are still delivered (without a timestamp) so the trace builder
// can reject the run with the offending case and value.

mod timestamp;

pub use timestamp::parse_timestamp;

use crate::error::{AnalyticsError, Result};
use crate::event::RawRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header names of the case, activity and timestamp columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub case: String,
    pub activity: String,
    pub timestamp: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            case: "case_id".to_string(),
            activity: "activity".to_string(),
            timestamp: "timestamp".to_string(),
        }
    }
}

/// Resolved column positions within a CSV row
struct ColumnIndex {
    case: usize,
    activity: usize,
    timestamp: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, mapping: &ColumnMapping) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AnalyticsError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            case: find(&mapping.case)?,
            activity: find(&mapping.activity)?,
            timestamp: find(&mapping.timestamp)?,
        })
    }

    fn record(&self, row: &StringRecord) -> RawRecord {
        let field = |idx: usize| row.get(idx).unwrap_or_default();
        let raw_timestamp = field(self.timestamp);

        RawRecord {
            case_id: field(self.case).into(),
            activity: field(self.activity).to_string(),
            timestamp: parse_timestamp(raw_timestamp),
            raw_timestamp: raw_timestamp.to_string(),
        }
    }
}

/// Read raw records from CSV data
///
/// # Errors
/// Returns [`AnalyticsError::MissingColumn`] if a mapped column is absent
/// from the header, or [`AnalyticsError::Csv`] for malformed CSV.
pub fn read_records<R: Read>(reader: R, mapping: &ColumnMapping) -> Result<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::resolve(csv_reader.headers()?, mapping)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        records.push(columns.record(&row?));
    }

    let unparsed = records.iter().filter(|r| r.timestamp.is_none()).count();
    tracing::debug!(records = records.len(), unparsed, "read event log rows");

    Ok(records)
}

/// Read raw records from a CSV file
pub fn read_records_from_path<P: AsRef<Path>>(
    path: P,
    mapping: &ColumnMapping,
) -> Result<Vec<RawRecord>> {
    let file = File::open(path.as_ref())?;
    read_records(file, mapping)
}
