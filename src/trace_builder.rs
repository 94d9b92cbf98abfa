//! Trace builder: raw records to a cleaned [`EventLog`]
//!
//! Groups records by case, orders each case by timestamp (stable, so equal
//! timestamps keep their input order) and drops cases smaller than the
//! configured minimum size. A record without a usable timestamp aborts the
//! build, since it would corrupt the ordering of its whole case. So does a
//! blank case id or activity label.

use crate::error::{AnalyticsError, Result};
use crate::event::{CaseId, Event, EventLog, RawRecord, Trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default minimum number of events a case needs to be analyzed
pub const DEFAULT_MIN_CASE_SIZE: usize = 2;

/// Trace builder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceBuilderConfig {
    /// Cases with fewer events are discarded
    pub min_case_size: usize,
}

impl Default for TraceBuilderConfig {
    fn default() -> Self {
        Self {
            min_case_size: DEFAULT_MIN_CASE_SIZE,
        }
    }
}

/// Build an event log from raw records
///
/// # Errors
/// Returns [`AnalyticsError::EmptyField`] for the first record with a blank
/// case id or activity, and [`AnalyticsError::InvalidRecord`] for the first
/// record whose timestamp could not be normalized, naming its case and raw
/// value.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use procmine::event::RawRecord;
/// use procmine::trace_builder::{build_event_log, TraceBuilderConfig};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let records = vec![
///     RawRecord::new("A", "approve", t0 + chrono::Duration::minutes(5)),
///     RawRecord::new("A", "submit", t0),
///     RawRecord::new("B", "submit", t0),
/// ];
///
/// let log = build_event_log(records, &TraceBuilderConfig::default()).unwrap();
/// assert_eq!(log.len(), 1); // case B has a single event
/// assert_eq!(
///     log.traces()[0].activities().collect::<Vec<_>>(),
///     vec!["submit", "approve"]
/// );
/// ```
pub fn build_event_log<I>(records: I, config: &TraceBuilderConfig) -> Result<EventLog>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut groups: HashMap<CaseId, Vec<Event>> = HashMap::new();
    let mut record_count = 0usize;

    for (idx, record) in records.into_iter().enumerate() {
        record_count += 1;
        let line = idx + 1;
        if record.case_id.as_str().trim().is_empty() {
            return Err(AnalyticsError::EmptyField {
                field: "case id",
                line,
            });
        }
        if record.activity.trim().is_empty() {
            return Err(AnalyticsError::EmptyField {
                field: "activity",
                line,
            });
        }

        let Some(timestamp) = record.timestamp else {
            return Err(AnalyticsError::InvalidRecord {
                case_id: record.case_id.to_string(),
                raw_timestamp: record.raw_timestamp,
                line,
            });
        };

        groups
            .entry(record.case_id.clone())
            .or_default()
            .push(Event::new(record.case_id, record.activity, timestamp));
    }

    let case_count = groups.len();
    let traces: Vec<Trace> = groups
        .into_iter()
        .filter(|(_, events)| events.len() >= config.min_case_size)
        .map(|(case_id, mut events)| {
            // sort_by_key is stable: ties keep input order
            events.sort_by_key(Event::timestamp);
            Trace::from_sorted(case_id, events)
        })
        .collect();

    tracing::debug!(
        records = record_count,
        cases = case_count,
        kept = traces.len(),
        dropped = case_count - traces.len(),
        min_case_size = config.min_case_size,
        "built event log"
    );

    Ok(EventLog::from_traces(traces))
}
