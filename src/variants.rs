//! Process variant analysis
//!
//! A variant is the ordered sequence of activity labels of a trace. Two
//! traces share a variant iff their sequences are equal element for
//! element; repeats are kept as-is.

use crate::event::{CaseId, EventLog, Trace};
use crate::stats::{self, hours2};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Separator used when a variant is shown as a single string
pub const DISPLAY_SEPARATOR: &str = " -> ";

/// Ordered activity-label sequence identifying a variant
///
/// Compared by value, element-wise, so activity names containing the
/// display separator cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VariantKey(Vec<String>);

impl VariantKey {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Variant of a trace
    pub fn of(trace: &Trace) -> Self {
        Self::new(trace.activities())
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `trace` follows exactly this variant
    pub fn matches(&self, trace: &Trace) -> bool {
        trace.len() == self.0.len() && trace.activities().eq(self.0.iter().map(String::as_str))
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(DISPLAY_SEPARATOR))
    }
}

/// Frequency and mean duration of one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRecord {
    pub variant: VariantKey,
    /// Number of traces following this variant
    pub count: usize,
    /// Mean first-to-last span in seconds (0 when no trace qualifies)
    pub avg_duration: f64,
    /// Cases that produced this variant, in log order
    pub cases: Vec<CaseId>,
}

impl VariantRecord {
    pub fn to_row(&self) -> VariantRow {
        VariantRow {
            variant: self.variant.to_string(),
            count: self.count,
            avg_hours: hours2(self.avg_duration),
        }
    }
}

/// Presentation row for tables and CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRow {
    #[serde(rename = "Variant")]
    pub variant: String,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Avg Duration (hours)")]
    pub avg_hours: f64,
}

/// Variant records ordered by count (descending), then key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantReport {
    pub records: Vec<VariantRecord>,
}

impl VariantReport {
    pub fn get(&self, key: &VariantKey) -> Option<&VariantRecord> {
        self.records.iter().find(|r| &r.variant == key)
    }

    pub fn rows(&self) -> Vec<VariantRow> {
        self.records.iter().map(VariantRecord::to_row).collect()
    }

    /// Number of traces covered by all variants
    pub fn trace_count(&self) -> usize {
        self.records.iter().map(|r| r.count).sum()
    }
}

/// Group traces into variants and aggregate their durations
pub fn analyze_variants(log: &EventLog) -> VariantReport {
    // Phase 1: key every trace (BTreeMap keeps keys ordered)
    let mut groups: BTreeMap<VariantKey, Vec<&Trace>> = BTreeMap::new();
    for trace in log {
        groups.entry(VariantKey::of(trace)).or_default().push(trace);
    }

    // Phase 2: fold each group
    let mut records: Vec<VariantRecord> = groups
        .into_iter()
        .map(|(variant, traces)| {
            let spans: Vec<f64> = traces.iter().filter_map(|t| t.duration_secs()).collect();
            VariantRecord {
                variant,
                count: traces.len(),
                avg_duration: stats::mean(&spans).unwrap_or(0.0),
                cases: traces.iter().map(|t| t.case_id().clone()).collect(),
            }
        })
        .collect();

    // Stable sort over key-ordered input: ties stay key-ascending
    records.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(
        traces = log.len(),
        variants = records.len(),
        "extracted variants"
    );

    VariantReport { records }
}

/// Sub-log holding exactly the traces that follow `key`
pub fn filter_variant(log: &EventLog, key: &VariantKey) -> EventLog {
    let traces = log.iter().filter(|t| key.matches(t)).cloned().collect();
    EventLog::from_traces(traces)
}
