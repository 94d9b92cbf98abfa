// Ranking of transition times into bottleneck tables
//
// Invalid entries (NaN, infinite, zero, negative) are noise, not failures:
// they are dropped and the rest is ranked. An input with nothing left is a
// distinct NoValidData outcome so callers can show a message instead of an
// empty table.

use crate::bottleneck::transition::{TransitionKey, TransitionTimes};
use crate::stats::hours2;
use serde::Serialize;

/// Number of headline bottleneck transitions
pub const DEFAULT_TOP_K: usize = 5;

/// A transition and its mean time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckRecord {
    pub transition: TransitionKey,
    /// Mean transition time in seconds
    pub mean_time: f64,
}

impl BottleneckRecord {
    pub fn to_row(&self) -> BottleneckRow {
        BottleneckRow {
            from: self.transition.from.clone(),
            to: self.transition.to.clone(),
            avg_hours: hours2(self.mean_time),
        }
    }
}

/// Presentation row for tables and CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckRow {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Avg Time (hours)")]
    pub avg_hours: f64,
}

/// Valid transitions sorted by mean time, slowest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckRanking {
    ranked: Vec<BottleneckRecord>,
    top_k: usize,
}

impl BottleneckRanking {
    /// Headline bottlenecks: the first `top_k` entries
    pub fn top(&self) -> &[BottleneckRecord] {
        &self.ranked[..self.top_k.min(self.ranked.len())]
    }

    /// Full ranked table
    pub fn all(&self) -> &[BottleneckRecord] {
        &self.ranked
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn rows(&self) -> Vec<BottleneckRow> {
        self.ranked.iter().map(BottleneckRecord::to_row).collect()
    }
}

/// Result of bottleneck ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BottleneckOutcome {
    Ranked(BottleneckRanking),
    /// No entry had a valid positive mean time
    NoValidData,
}

impl BottleneckOutcome {
    pub fn ranking(&self) -> Option<&BottleneckRanking> {
        match self {
            Self::Ranked(ranking) => Some(ranking),
            Self::NoValidData => None,
        }
    }

    pub fn is_no_valid_data(&self) -> bool {
        matches!(self, Self::NoValidData)
    }
}

fn is_valid_mean(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Rank transitions by mean time, descending
///
/// Ties are broken by (from, to) ascending.
///
/// # Example
/// ```
/// use procmine::bottleneck::{rank_bottlenecks, TransitionKey, TransitionTimes};
///
/// let mut times = TransitionTimes::new();
/// times.insert(TransitionKey::new("a", "b"), -5.0);
/// times.insert(TransitionKey::new("c", "d"), 0.0);
/// times.insert(TransitionKey::new("e", "f"), 300.0);
///
/// let outcome = rank_bottlenecks(&times, 5);
/// let ranking = outcome.ranking().unwrap();
/// assert_eq!(ranking.top().len(), 1);
/// assert_eq!(ranking.top()[0].transition, TransitionKey::new("e", "f"));
/// ```
pub fn rank_bottlenecks(times: &TransitionTimes, top_k: usize) -> BottleneckOutcome {
    let mut ranked: Vec<BottleneckRecord> = times
        .iter()
        .filter(|(_, mean)| is_valid_mean(**mean))
        .map(|(transition, mean)| BottleneckRecord {
            transition: transition.clone(),
            mean_time: *mean,
        })
        .collect();

    let rejected = times.len() - ranked.len();
    if rejected > 0 {
        tracing::warn!(
            rejected,
            total = times.len(),
            "dropped transitions without a valid positive mean time"
        );
    }

    if ranked.is_empty() {
        return BottleneckOutcome::NoValidData;
    }

    ranked.sort_by(|a, b| {
        b.mean_time
            .total_cmp(&a.mean_time)
            .then_with(|| a.transition.cmp(&b.transition))
    });

    BottleneckOutcome::Ranked(BottleneckRanking { ranked, top_k })
}
