//! Procmine - event-log analytics for process performance
//!
//! Turns a raw table of (case, activity, timestamp) records into cleaned,
//! time-ordered traces and derives activity timing, process variants, case
//! durations and ranked bottleneck transitions from them.

pub mod activity_timing;
pub mod bottleneck;
pub mod case_duration;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dfg;
pub mod error;
pub mod event;
pub mod ingest;
pub mod json_output;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod trace_builder;
pub mod variants;

pub use error::{AnalyticsError, Result};
