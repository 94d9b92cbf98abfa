//! Property-based tests for the analytics pipeline
//!
//! Core properties:
//! 1. Traces are time-sorted and respect the minimum case size
//! 2. Activity counts match label occurrences; percentages sum to 100
//! 3. Variant counts cover every trace; the variant filter is exact
//! 4. Bottleneck rankings are non-increasing and strictly positive
//! 5. Repeated and parallel runs produce identical reports

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use procmine::activity_timing::analyze_activity_timing;
use procmine::bottleneck::{rank_bottlenecks, TransitionKey, TransitionTimes};
use procmine::config::AnalysisConfig;
use procmine::event::RawRecord;
use procmine::pipeline::analyze;
use procmine::trace_builder::{build_event_log, TraceBuilderConfig};
use procmine::variants::{analyze_variants, filter_variant, VariantKey};

/// Arbitrary records over a small case/activity alphabet
fn arb_records() -> impl Strategy<Value = Vec<RawRecord>> {
    prop::collection::vec(("[A-E]", "[a-d]", 0i64..10_000), 0..60).prop_map(|rows| {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        rows.into_iter()
            .map(|(case, activity, secs)| {
                RawRecord::new(case, activity, t0 + Duration::seconds(secs))
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_traces_sorted_and_large_enough(
        records in arb_records(),
        min_case_size in 1usize..5,
    ) {
        let log = build_event_log(records, &TraceBuilderConfig { min_case_size }).unwrap();

        for trace in &log {
            prop_assert!(trace.len() >= min_case_size);
            prop_assert!(trace
                .events()
                .windows(2)
                .all(|w| w[0].timestamp() <= w[1].timestamp()));
            prop_assert!(trace.events().iter().all(|e| e.case_id() == trace.case_id()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_activity_counts_and_percentages(records in arb_records()) {
        let log = build_event_log(records, &TraceBuilderConfig::default()).unwrap();
        let report = analyze_activity_timing(&log);

        for record in &report.records {
            let occurrences = log
                .iter()
                .flat_map(|t| t.activities())
                .filter(|a| *a == record.activity)
                .count();
            prop_assert_eq!(record.count, occurrences);
            prop_assert!(record.durations.iter().all(|d| *d >= 0.0));
        }

        prop_assert_eq!(report.total_events, log.event_count());
        if !report.records.is_empty() {
            let total: f64 = report.rows().iter().map(|r| r.percentage).sum();
            // Each row is rounded to 2 decimals
            prop_assert!((total - 100.0).abs() <= 0.005 * report.records.len() as f64 + 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_variant_counts_cover_log(records in arb_records()) {
        let log = build_event_log(records, &TraceBuilderConfig::default()).unwrap();
        let report = analyze_variants(&log);

        prop_assert_eq!(report.trace_count(), log.len());

        for record in &report.records {
            let sub = filter_variant(&log, &record.variant);
            prop_assert_eq!(sub.len(), record.count);
            for trace in &sub {
                prop_assert_eq!(&VariantKey::of(trace), &record.variant);
            }
        }

        let counts: Vec<usize> = report.records.iter().map(|r| r.count).collect();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_bottleneck_ranking_sorted_and_positive(
        entries in prop::collection::vec(("[a-f]", "[a-f]", -1000.0f64..1000.0), 0..30),
        top_k in 1usize..8,
    ) {
        let times: TransitionTimes = entries
            .into_iter()
            .map(|(from, to, mean)| (TransitionKey::new(from, to), mean))
            .collect();
        let positive = times.values().filter(|m| **m > 0.0).count();

        let outcome = rank_bottlenecks(&times, top_k);
        match outcome.ranking() {
            Some(ranking) => {
                prop_assert_eq!(ranking.all().len(), positive);
                prop_assert!(ranking.all().iter().all(|r| r.mean_time > 0.0));
                prop_assert!(ranking
                    .all()
                    .windows(2)
                    .all(|w| w[0].mean_time >= w[1].mean_time));
                prop_assert_eq!(ranking.top().len(), top_k.min(positive));
            }
            None => prop_assert_eq!(positive, 0),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_pipeline_idempotent(records in arb_records()) {
        let config = AnalysisConfig::default();
        let first = analyze(records.clone(), None, &config).unwrap();
        let second = analyze(records.clone(), None, &config).unwrap();
        let parallel = analyze(records, None, &AnalysisConfig { parallel: true, ..config }).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);
    }
}
