//! Activity frequency and timing analysis
//!
//! For every activity label: how often it occurs and how long it took to
//! arrive at it from the preceding event of the same case. An activity that
//! opens a case contributes to its count but has no preceding event, so it
//! adds no duration sample.
//!
//! Built in two phases: every event is first turned into an immutable
//! `(label, Option<seconds>)` observation, then each label group is folded
//! into its [`ActivityTimingRecord`].

use crate::event::{elapsed_secs, EventLog};
use crate::stats::{hours2, round2, SampleStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Frequency and arrival-time samples for one activity label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityTimingRecord {
    pub activity: String,
    /// Occurrences across the log, first-in-trace included
    pub count: usize,
    /// `count` / total events, as a fraction (full precision)
    pub percentage: f64,
    /// Seconds since the preceding event in the same trace
    pub durations: Vec<f64>,
}

impl ActivityTimingRecord {
    /// Summary of the duration samples; `None` if the activity always opens its trace
    pub fn duration_stats(&self) -> Option<SampleStats> {
        SampleStats::from_samples(&self.durations)
    }

    /// Flat presentation row (hours, two decimals)
    pub fn to_row(&self) -> ActivityRow {
        let stats = self.duration_stats();
        ActivityRow {
            activity: self.activity.clone(),
            count: self.count,
            percentage: round2(self.percentage * 100.0),
            min_hours: stats.map_or(0.0, |s| hours2(s.min)),
            avg_hours: stats.map_or(0.0, |s| hours2(s.mean)),
            max_hours: stats.map_or(0.0, |s| hours2(s.max)),
            sample_size: self.durations.len(),
        }
    }
}

/// Presentation row for tables and CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    #[serde(rename = "Activity")]
    pub activity: String,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Percentage (%)")]
    pub percentage: f64,
    #[serde(rename = "Min Duration (hours)")]
    pub min_hours: f64,
    #[serde(rename = "Avg Duration (hours)")]
    pub avg_hours: f64,
    #[serde(rename = "Max Duration (hours)")]
    pub max_hours: f64,
    #[serde(rename = "Sample Size")]
    pub sample_size: usize,
}

/// Activity timing records ordered by count (descending), then label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityTimingReport {
    pub total_events: usize,
    pub records: Vec<ActivityTimingRecord>,
}

impl ActivityTimingReport {
    pub fn get(&self, activity: &str) -> Option<&ActivityTimingRecord> {
        self.records.iter().find(|r| r.activity == activity)
    }

    pub fn rows(&self) -> Vec<ActivityRow> {
        self.records.iter().map(ActivityTimingRecord::to_row).collect()
    }
}

/// One event seen by the analyzer: its label and arrival time, if any
struct Observation<'a> {
    activity: &'a str,
    arrival_secs: Option<f64>,
}

fn observations(log: &EventLog) -> impl Iterator<Item = Observation<'_>> {
    log.iter().flat_map(|trace| {
        let events = trace.events();
        events.iter().enumerate().map(move |(idx, event)| Observation {
            activity: event.activity(),
            arrival_secs: idx
                .checked_sub(1)
                .map(|prev| elapsed_secs(events[prev].timestamp(), event.timestamp())),
        })
    })
}

/// Compute per-activity frequency and timing
pub fn analyze_activity_timing(log: &EventLog) -> ActivityTimingReport {
    // Phase 1: group observations by label (BTreeMap keeps label order)
    let mut groups: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for obs in observations(log) {
        groups.entry(obs.activity).or_default().push(obs.arrival_secs);
    }

    // Phase 2: fold each group into its record
    let total_events: usize = groups.values().map(Vec::len).sum();
    let mut records: Vec<ActivityTimingRecord> = groups
        .into_iter()
        .map(|(activity, arrivals)| ActivityTimingRecord {
            activity: activity.to_string(),
            count: arrivals.len(),
            percentage: arrivals.len() as f64 / total_events as f64,
            durations: arrivals.into_iter().flatten().collect(),
        })
        .collect();

    // Stable sort over label-ordered input: ties stay label-ascending
    records.sort_by(|a, b| b.count.cmp(&a.count));

    ActivityTimingReport {
        total_events,
        records,
    }
}
