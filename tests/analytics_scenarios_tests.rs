//! End-to-end analytics scenarios
//!
//! Small hand-checked event logs run through the library pipeline.

mod utils;

use procmine::activity_timing::analyze_activity_timing;
use procmine::bottleneck::{rank_bottlenecks, TransitionKey, TransitionTimes, DEFAULT_TOP_K};
use procmine::case_duration::analyze_case_durations;
use procmine::config::AnalysisConfig;
use procmine::event::EventLog;
use procmine::ingest::{read_records_from_path, ColumnMapping};
use procmine::pipeline::{analyze, analyze_log};
use procmine::trace_builder::{build_event_log, TraceBuilderConfig};
use procmine::variants::{analyze_variants, filter_variant, VariantKey};
use utils::records;

fn build(rows: &[(&str, &str, i64)]) -> EventLog {
    build_event_log(records(rows), &TraceBuilderConfig::default()).unwrap()
}

#[test]
fn test_arrival_time_averaged_across_cases() {
    let log = build(&[("A", "x", 0), ("A", "y", 60), ("B", "x", 0), ("B", "y", 120)]);
    let report = analyze_activity_timing(&log);

    let y = report.get("y").unwrap();
    assert_eq!(y.count, 2);
    assert_eq!(y.durations, vec![60.0, 120.0]);
    assert_eq!(y.duration_stats().unwrap().mean, 90.0);
}

#[test]
fn test_repeated_activity_forms_its_own_variant() {
    let log = build(&[("A", "x", 0), ("A", "x", 10), ("A", "y", 20)]);
    let variants = analyze_variants(&log);

    assert_eq!(variants.records.len(), 1);
    let record = &variants.records[0];
    assert_eq!(record.variant, VariantKey::new(["x", "x", "y"]));
    assert_eq!(record.count, 1);
    assert_eq!(record.avg_duration, 20.0);
}

#[test]
fn test_single_event_case_appears_nowhere() {
    let rows = [("A", "x", 0), ("A", "y", 30), ("lonely", "z", 5)];
    let report = analyze(records(&rows), None, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.case_count, 1);
    assert!(report.activities.get("z").is_none());
    assert!(report
        .case_durations
        .durations
        .iter()
        .all(|d| d.case_id.as_str() != "lonely"));
    assert!(report
        .variants
        .records
        .iter()
        .all(|r| !r.variant.labels().iter().any(|l| l == "z")));
    assert!(report
        .bottlenecks
        .ranking()
        .unwrap()
        .all()
        .iter()
        .all(|r| r.transition.from != "z" && r.transition.to != "z"));
}

#[test]
fn test_only_positive_transition_is_a_bottleneck() {
    let mut times = TransitionTimes::new();
    times.insert(TransitionKey::new("a", "b"), -5.0);
    times.insert(TransitionKey::new("c", "d"), 0.0);
    times.insert(TransitionKey::new("e", "f"), 300.0);

    let outcome = rank_bottlenecks(&times, DEFAULT_TOP_K);
    let ranking = outcome.ranking().unwrap();
    assert_eq!(ranking.all().len(), 1);
    assert_eq!(ranking.top().len(), 1);
    assert_eq!(ranking.top()[0].transition, TransitionKey::new("e", "f"));
}

#[test]
fn test_empty_log_case_durations_report_no_data() {
    let summary = analyze_case_durations(&EventLog::default()).summary;
    assert_eq!(summary.min, None);
    assert_eq!(summary.max, None);
    assert_eq!(summary.mean, None);
}

#[test]
fn test_variant_filter_feeds_sub_analysis() {
    let log = build(&[
        ("A", "a", 0),
        ("A", "b", 100),
        ("B", "a", 0),
        ("B", "c", 10),
        ("C", "a", 0),
        ("C", "b", 300),
    ]);
    let key = VariantKey::new(["a", "b"]);
    let sub = filter_variant(&log, &key);

    let sub_report = analyze_log(&sub, None, &AnalysisConfig::default());
    assert_eq!(sub_report.case_count, 2);
    assert_eq!(sub_report.variants.records.len(), 1);
    assert_eq!(sub_report.variants.records[0].variant, key);
    assert_eq!(sub_report.case_durations.summary.mean, Some(200.0));
}

#[test]
fn test_purchase_order_fixture() {
    let mapping = ColumnMapping {
        case: "order_id".to_string(),
        activity: "step".to_string(),
        timestamp: "performed_at".to_string(),
    };
    let records = read_records_from_path(utils::fixture("purchase_orders.csv"), &mapping).unwrap();
    let report = analyze(records, None, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.case_count, 3);
    assert_eq!(report.event_count, 8);

    let activities: Vec<(&str, usize)> = report
        .activities
        .records
        .iter()
        .map(|r| (r.activity.as_str(), r.count))
        .collect();
    assert_eq!(
        activities,
        vec![
            ("Create Order", 3),
            ("Approve Order", 2),
            ("Ship Goods", 2),
            ("Reject Order", 1),
        ]
    );

    let approve = report.activities.get("Approve Order").unwrap().to_row();
    assert_eq!(approve.avg_hours, 3.0);
    assert_eq!(approve.percentage, 25.0);

    let top_variant = &report.variants.records[0];
    assert_eq!(top_variant.count, 2);
    assert_eq!(top_variant.to_row().avg_hours, 27.0);

    let ranking = report.bottlenecks.ranking().unwrap();
    assert_eq!(
        ranking.top()[0].transition,
        TransitionKey::new("Approve Order", "Ship Goods")
    );
    assert_eq!(ranking.top()[0].mean_time, 86_400.0);
    assert_eq!(ranking.all().len(), 3);

    assert_eq!(report.case_durations.summary.min, Some(1800.0));
    assert_eq!(report.case_durations.summary.max, Some(108_000.0));
}

#[test]
fn test_pipeline_runs_are_identical() {
    let rows = [
        ("A", "a", 0),
        ("A", "b", 7),
        ("A", "a", 9),
        ("B", "b", 0),
        ("B", "a", 4),
        ("C", "a", 0),
        ("C", "b", 7),
        ("C", "a", 9),
    ];
    let config = AnalysisConfig::default();
    let first = analyze(records(&rows), None, &config).unwrap();
    let second = analyze(records(&rows), None, &config).unwrap();
    let parallel = analyze(
        records(&rows),
        None,
        &AnalysisConfig {
            parallel: true,
            ..config
        },
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
}
