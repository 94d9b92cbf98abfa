//! Analytics pipeline
//!
//! The trace builder runs once; its immutable [`EventLog`] is then fanned
//! out to the case-duration, activity-timing, variant and bottleneck
//! analyses. With `parallel` set they run on scoped worker threads; the
//! report is the same either way.

use crate::activity_timing::{analyze_activity_timing, ActivityTimingReport};
use crate::bottleneck::{rank_bottlenecks, BottleneckOutcome, TransitionTimes};
use crate::case_duration::{analyze_case_durations, CaseDurationReport};
use crate::config::AnalysisConfig;
use crate::dfg::discover_performance_dfg;
use crate::error::Result;
use crate::event::{EventLog, RawRecord};
use crate::trace_builder::build_event_log;
use crate::variants::{analyze_variants, VariantReport};
use serde::Serialize;
use std::panic;

/// Where the ranked transition times came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSource {
    /// Measured from the log's directly-follows hand-offs
    Measured,
    /// Supplied by an external discovery tool
    External,
}

/// All derived record collections of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub case_count: usize,
    pub event_count: usize,
    pub case_durations: CaseDurationReport,
    pub activities: ActivityTimingReport,
    pub variants: VariantReport,
    pub transition_source: TransitionSource,
    pub bottlenecks: BottleneckOutcome,
}

/// Build the event log and analyze it
///
/// When `transitions` is `None` the transition times are measured from the
/// log itself.
pub fn analyze<I>(
    records: I,
    transitions: Option<&TransitionTimes>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport>
where
    I: IntoIterator<Item = RawRecord>,
{
    config.validate()?;
    let log = build_event_log(records, &config.trace_builder())?;
    Ok(analyze_log(&log, transitions, config))
}

/// Analyze an already-built event log
pub fn analyze_log(
    log: &EventLog,
    transitions: Option<&TransitionTimes>,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let top_k = config.top_k;
    let rank = || match transitions {
        Some(times) => rank_bottlenecks(times, top_k),
        None => rank_bottlenecks(&discover_performance_dfg(log).mean_times(), top_k),
    };

    tracing::debug!(
        cases = log.len(),
        events = log.event_count(),
        parallel = config.parallel,
        "running analyzers"
    );

    let (case_durations, activities, variants, bottlenecks) = if config.parallel {
        let scoped = crossbeam::thread::scope(|s| {
            let cases = s.spawn(|_| analyze_case_durations(log));
            let activities = s.spawn(|_| analyze_activity_timing(log));
            let variants = s.spawn(|_| analyze_variants(log));
            let ranked = rank();
            (
                join(cases.join()),
                join(activities.join()),
                join(variants.join()),
                ranked,
            )
        });
        join(scoped)
    } else {
        (
            analyze_case_durations(log),
            analyze_activity_timing(log),
            analyze_variants(log),
            rank(),
        )
    };

    AnalysisReport {
        case_count: log.len(),
        event_count: log.event_count(),
        case_durations,
        activities,
        variants,
        transition_source: if transitions.is_some() {
            TransitionSource::External
        } else {
            TransitionSource::Measured
        },
        bottlenecks,
    }
}

/// Re-raise a worker panic on the calling thread
fn join<T>(result: std::thread::Result<T>) -> T {
    result.unwrap_or_else(|payload| panic::resume_unwind(payload))
}
