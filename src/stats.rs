//! Descriptive statistics over duration samples
//!
//! Shared by the case-duration, activity-timing and transition analyses.
//! All samples are elapsed seconds as `f64`.

use serde::Serialize;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Summary of a non-empty sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// P50, linear interpolation between closest ranks
    pub median: f64,
    /// Population standard deviation
    pub stdev: f64,
}

impl SampleStats {
    /// Summarize `samples`; `None` when there are no samples
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = mean(&sorted)?;
        let variance = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median: percentile(&sorted, 50.0),
            stdev: variance.sqrt(),
        })
    }
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Calculate percentile from sorted data
pub fn percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Convert seconds to hours
pub fn secs_to_hours(secs: f64) -> f64 {
    secs / SECONDS_PER_HOUR
}

/// Round to two decimal places for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Seconds as hours rounded to two decimals
pub fn hours2(secs: f64) -> f64 {
    round2(secs_to_hours(secs))
}
