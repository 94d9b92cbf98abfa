//! Event log data model
//!
//! Raw records arrive unordered and possibly malformed. The trace builder
//! turns them into [`Event`]s grouped into time-ordered [`Trace`]s, and the
//! resulting [`EventLog`] is shared read-only by every analyzer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute point in time, normalized to UTC
pub type Timestamp = DateTime<Utc>;

/// Case identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CaseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A record as delivered by a record source, before cleaning
///
/// `timestamp` is `None` when the source could not normalize
/// `raw_timestamp`; the trace builder rejects such records.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub case_id: CaseId,
    pub activity: String,
    pub timestamp: Option<Timestamp>,
    /// Timestamp text as received (kept for error reporting)
    pub raw_timestamp: String,
}

impl RawRecord {
    /// Record with an already-normalized timestamp
    pub fn new(case_id: impl Into<CaseId>, activity: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            case_id: case_id.into(),
            activity: activity.into(),
            timestamp: Some(timestamp),
            raw_timestamp: timestamp.to_rfc3339(),
        }
    }

    /// Record whose timestamp text could not be normalized
    pub fn unparsed(
        case_id: impl Into<CaseId>,
        activity: impl Into<String>,
        raw_timestamp: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            activity: activity.into(),
            timestamp: None,
            raw_timestamp: raw_timestamp.into(),
        }
    }
}

/// A single recorded activity of one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    case_id: CaseId,
    activity: String,
    timestamp: Timestamp,
}

impl Event {
    pub fn new(case_id: CaseId, activity: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            case_id,
            activity: activity.into(),
            timestamp,
        }
    }

    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Elapsed seconds from `earlier` to `later` (negative if reversed)
pub fn elapsed_secs(earlier: Timestamp, later: Timestamp) -> f64 {
    let delta = later - earlier;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // Spans beyond ~292 years overflow nanoseconds
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Time-ordered events of one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    case_id: CaseId,
    events: Vec<Event>,
}

impl Trace {
    /// Build a trace from events already sorted by timestamp
    pub(crate) fn from_sorted(case_id: CaseId, events: Vec<Event>) -> Self {
        debug_assert!(events
            .windows(2)
            .all(|w| w[0].timestamp() <= w[1].timestamp()));
        Self { case_id, events }
    }

    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Activity labels in trace order
    pub fn activities(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().map(Event::activity)
    }

    /// Elapsed seconds from first to last event
    ///
    /// `None` when the trace has fewer than two events.
    pub fn duration_secs(&self) -> Option<f64> {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) if self.events.len() >= 2 => {
                Some(elapsed_secs(first.timestamp(), last.timestamp()))
            }
            _ => None,
        }
    }
}

/// Cleaned, case-grouped traces, ordered by case id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    traces: Vec<Trace>,
}

impl EventLog {
    pub(crate) fn from_traces(mut traces: Vec<Trace>) -> Self {
        traces.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        Self { traces }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    /// Number of traces (cases)
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Total number of events across all traces
    pub fn event_count(&self) -> usize {
        self.traces.iter().map(Trace::len).sum()
    }

    pub fn trace(&self, case_id: &CaseId) -> Option<&Trace> {
        self.traces
            .binary_search_by(|t| t.case_id.cmp(case_id))
            .ok()
            .map(|idx| &self.traces[idx])
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Trace;
    type IntoIter = std::slice::Iter<'a, Trace>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn trace(case: &str, steps: &[(&str, i64)]) -> Trace {
        let case_id = CaseId::from(case);
        let events = steps
            .iter()
            .map(|(activity, offset)| {
                Event::new(case_id.clone(), *activity, t0() + Duration::seconds(*offset))
            })
            .collect();
        Trace::from_sorted(case_id, events)
    }

    #[test]
    fn test_elapsed_secs_subsecond() {
        let later = t0() + Duration::milliseconds(1500);
        assert_eq!(elapsed_secs(t0(), later), 1.5);
        assert_eq!(elapsed_secs(later, t0()), -1.5);
    }

    #[test]
    fn test_trace_duration() {
        let t = trace("A", &[("x", 0), ("y", 30), ("z", 90)]);
        assert_eq!(t.duration_secs(), Some(90.0));
        assert_eq!(t.activities().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_trace_duration_single_event() {
        let t = trace("A", &[("x", 0)]);
        assert_eq!(t.duration_secs(), None);
    }

    #[test]
    fn test_trace_duration_equal_timestamps_is_zero() {
        let t = trace("A", &[("x", 0), ("y", 0)]);
        assert_eq!(t.duration_secs(), Some(0.0));
    }

    #[test]
    fn test_event_log_orders_and_looks_up_cases() {
        let log = EventLog::from_traces(vec![
            trace("B", &[("x", 0), ("y", 1)]),
            trace("A", &[("x", 0), ("y", 1), ("z", 2)]),
        ]);
        let ids: Vec<_> = log.iter().map(|t| t.case_id().as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(log.event_count(), 5);
        assert_eq!(log.trace(&CaseId::from("B")).map(Trace::len), Some(2));
        assert!(log.trace(&CaseId::from("C")).is_none());
    }

    #[test]
    fn test_raw_record_constructors() {
        let ok = RawRecord::new("A", "x", t0());
        assert_eq!(ok.timestamp, Some(t0()));
        assert_eq!(ok.raw_timestamp, "2024-03-01T08:00:00+00:00");

        let bad = RawRecord::unparsed("A", "x", "not a date");
        assert!(bad.timestamp.is_none());
        assert_eq!(bad.raw_timestamp, "not a date");
    }
}
