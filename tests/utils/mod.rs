// Shared helpers for integration tests

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use procmine::event::{RawRecord, Timestamp};
use std::path::PathBuf;

/// Reference instant all offsets are relative to
pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Build records from (case, activity, seconds after t0)
pub fn records(rows: &[(&str, &str, i64)]) -> Vec<RawRecord> {
    rows.iter()
        .map(|(case, activity, secs)| {
            RawRecord::new(*case, *activity, t0() + Duration::seconds(*secs))
        })
        .collect()
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
