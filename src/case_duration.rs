//! Case duration analysis
//!
//! A case's duration is the span from its first to its last event. The
//! summary uses `Option` as the "no data" sentinel so an empty log is never
//! confused with a log of zero-length cases.

use crate::event::{CaseId, EventLog};
use crate::stats::{self, hours2};
use serde::Serialize;

/// Elapsed time of one case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseDuration {
    pub case_id: CaseId,
    /// First-to-last event span in seconds
    pub duration_secs: f64,
}

/// Min / max / mean case duration in seconds
///
/// Each field is `None` when the log has no cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DurationSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl DurationSummary {
    pub fn has_data(&self) -> bool {
        self.mean.is_some()
    }

    /// Format a summary value in hours, "N/A" for the no-data sentinel
    pub fn format_hours(value: Option<f64>) -> String {
        match value {
            Some(secs) => format!("{:.2} hours", hours2(secs)),
            None => "N/A".to_string(),
        }
    }
}

/// Per-case durations plus their summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseDurationReport {
    pub durations: Vec<CaseDuration>,
    pub summary: DurationSummary,
}

/// Compute the duration of every case in the log
pub fn analyze_case_durations(log: &EventLog) -> CaseDurationReport {
    let durations: Vec<CaseDuration> = log
        .iter()
        .filter_map(|trace| {
            trace.duration_secs().map(|duration_secs| CaseDuration {
                case_id: trace.case_id().clone(),
                duration_secs,
            })
        })
        .collect();

    let secs: Vec<f64> = durations.iter().map(|d| d.duration_secs).collect();
    let summary = DurationSummary {
        min: secs.iter().copied().reduce(f64::min),
        max: secs.iter().copied().reduce(f64::max),
        mean: stats::mean(&secs),
    };

    CaseDurationReport { durations, summary }
}
