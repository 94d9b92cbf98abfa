// Transition keys and boundary normalization of transition times
//
// External discovery tools report a transition's performance either as a
// nested statistic record ({"mean": .., "median": ..}) or as a bare number.
// Both shapes are collapsed into one f64 here, before ranking ever sees them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered pair of activities (from, to)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionKey {
    pub from: String,
    pub to: String,
}

impl TransitionKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Mean transition time in seconds per activity pair
pub type TransitionTimes = BTreeMap<TransitionKey, f64>;

/// Transition performance value as reported by an external tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTransitionStat {
    /// Bare mean in seconds
    Number(f64),
    /// Statistic record; only `mean` is used
    Record {
        #[serde(default)]
        mean: Option<f64>,
    },
    /// Anything else (strings, arrays, null)
    Other(serde_json::Value),
}

impl RawTransitionStat {
    /// Mean seconds carried by this value
    ///
    /// A record without a mean counts as zero; a non-numeric value becomes
    /// NaN. Both are later rejected by the ranker's validity filter.
    pub fn mean_secs(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Record { mean } => mean.unwrap_or(0.0),
            Self::Other(_) => f64::NAN,
        }
    }
}

/// Collapse raw transition statistics into typed transition times
pub fn normalize_transitions<I>(raw: I) -> TransitionTimes
where
    I: IntoIterator<Item = (TransitionKey, RawTransitionStat)>,
{
    let mut times = TransitionTimes::new();
    for (key, stat) in raw {
        let mean = stat.mean_secs();
        if let Some(previous) = times.insert(key.clone(), mean) {
            tracing::warn!(
                transition = %key,
                previous,
                replacement = mean,
                "duplicate transition entry; keeping the last value"
            );
        }
    }
    times
}

#[derive(Deserialize)]
struct ExternalTransition {
    from: String,
    to: String,
    value: RawTransitionStat,
}

/// Parse transition times exported by an external discovery tool
///
/// # Example JSON
/// ```json
/// [
///   {"from": "submit", "to": "approve", "value": {"mean": 5400.0, "median": 3600.0}},
///   {"from": "approve", "to": "pay", "value": 120.0}
/// ]
/// ```
pub fn parse_transition_times(json: &str) -> Result<TransitionTimes> {
    let entries: Vec<ExternalTransition> = serde_json::from_str(json)?;
    Ok(normalize_transitions(
        entries
            .into_iter()
            .map(|e| (TransitionKey::new(e.from, e.to), e.value)),
    ))
}
