//! Performance directly-follows graph
//!
//! Measures how long each directly-follows hand-off (a then b, consecutive
//! in the same trace) takes across the log. Its mean times feed the
//! bottleneck ranker when no external measurement is supplied.
//!
//! This is a measurement of observed transitions, not model discovery: no
//! control-flow structure is inferred.

use crate::bottleneck::{TransitionKey, TransitionTimes};
use crate::event::{elapsed_secs, EventLog};
use crate::stats::SampleStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Observed timing of one directly-follows transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionPerformance {
    pub transition: TransitionKey,
    /// Number of times the hand-off was observed
    pub frequency: usize,
    pub stats: SampleStats,
}

/// Directly-follows transitions with their elapsed-time statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceDfg {
    edges: Vec<TransitionPerformance>,
}

impl PerformanceDfg {
    /// Edges ordered by transition key
    pub fn edges(&self) -> &[TransitionPerformance] {
        &self.edges
    }

    pub fn get(&self, key: &TransitionKey) -> Option<&TransitionPerformance> {
        self.edges
            .binary_search_by(|e| e.transition.cmp(key))
            .ok()
            .map(|idx| &self.edges[idx])
    }

    /// Mean seconds per transition, ready for bottleneck ranking
    pub fn mean_times(&self) -> TransitionTimes {
        self.edges
            .iter()
            .map(|e| (e.transition.clone(), e.stats.mean))
            .collect()
    }
}

/// Measure every directly-follows transition in the log
pub fn discover_performance_dfg(log: &EventLog) -> PerformanceDfg {
    let mut samples: BTreeMap<TransitionKey, Vec<f64>> = BTreeMap::new();

    for trace in log {
        for pair in trace.events().windows(2) {
            let key = TransitionKey::new(pair[0].activity(), pair[1].activity());
            samples
                .entry(key)
                .or_default()
                .push(elapsed_secs(pair[0].timestamp(), pair[1].timestamp()));
        }
    }

    let edges: Vec<TransitionPerformance> = samples
        .into_iter()
        .filter_map(|(transition, secs)| {
            SampleStats::from_samples(&secs).map(|stats| TransitionPerformance {
                transition,
                frequency: secs.len(),
                stats,
            })
        })
        .collect();

    tracing::debug!(transitions = edges.len(), "measured directly-follows transitions");

    PerformanceDfg { edges }
}
