#![no_main]

use libfuzzer_sys::fuzz_target;
use procmine::config::AnalysisConfig;
use procmine::ingest::{parse_timestamp, read_records, ColumnMapping};
use procmine::pipeline::analyze;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_timestamp(text);
    }

    // Arbitrary CSV must either be rejected or analyzed, never panic
    if let Ok(records) = read_records(data, &ColumnMapping::default()) {
        let _ = analyze(records, None, &AnalysisConfig::default());
    }
});
