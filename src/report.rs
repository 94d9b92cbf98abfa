//! Human-readable text report

use crate::case_duration::DurationSummary;
use crate::dfg::PerformanceDfg;
use crate::event::EventLog;
use crate::pipeline::AnalysisReport;
use crate::stats::hours2;
use crate::variants::VariantRecord;
use std::fmt::Write;

const RULE: &str = "------ --------- ------- ------- ------- ------- ----------------";

/// Render the full report as text
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(
        out,
        "Event log: {} cases, {} events",
        report.case_count, report.event_count
    )?;
    writeln!(out)?;

    let summary = &report.case_durations.summary;
    writeln!(out, "=== Case Duration ===")?;
    writeln!(out, "Avg: {}", DurationSummary::format_hours(summary.mean))?;
    writeln!(out, "Min: {}", DurationSummary::format_hours(summary.min))?;
    writeln!(out, "Max: {}", DurationSummary::format_hours(summary.max))?;
    writeln!(out)?;

    writeln!(out, "=== Activities ===")?;
    if report.activities.records.is_empty() {
        writeln!(out, "No activities.")?;
    } else {
        writeln!(out, "     %     count  min(h)  avg(h)  max(h) samples activity")?;
        writeln!(out, "{RULE}")?;
        for row in report.activities.rows() {
            writeln!(
                out,
                "{:6.2} {:>9} {:>7.2} {:>7.2} {:>7.2} {:>7} {}",
                row.percentage,
                row.count,
                row.min_hours,
                row.avg_hours,
                row.max_hours,
                row.sample_size,
                row.activity
            )?;
        }
        writeln!(out, "{RULE}")?;
        writeln!(out, "100.00 {:>9} total", report.activities.total_events)?;
    }
    writeln!(out)?;

    writeln!(out, "=== Variants ===")?;
    if report.variants.records.is_empty() {
        writeln!(out, "No variants.")?;
    } else {
        writeln!(out, "  #     count  avg(h) variant")?;
        for (rank, row) in report.variants.rows().iter().enumerate() {
            writeln!(
                out,
                "{:>3} {:>9} {:>7.2} {}",
                rank + 1,
                row.count,
                row.avg_hours,
                row.variant
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "=== Bottlenecks ===")?;
    match report.bottlenecks.ranking() {
        Some(ranking) => {
            writeln!(out, "Slowest transitions:")?;
            for record in ranking.top() {
                writeln!(
                    out,
                    "- {}: {:.2} hours",
                    record.transition,
                    hours2(record.mean_time)
                )?;
            }
            writeln!(out)?;
            writeln!(out, " avg(h) from -> to")?;
            for row in ranking.rows() {
                writeln!(out, "{:>7.2} {} -> {}", row.avg_hours, row.from, row.to)?;
            }
        }
        None => {
            writeln!(
                out,
                "No valid performance data available for bottleneck analysis"
            )?;
        }
    }

    Ok(())
}

/// Render one variant's cases and measured transitions
pub fn render_variant(record: &VariantRecord, sub_log: &EventLog, dfg: &PerformanceDfg) -> String {
    let mut out = String::new();
    let _ = write_variant(&mut out, record, sub_log, dfg);
    out
}

fn write_variant(
    out: &mut String,
    record: &VariantRecord,
    sub_log: &EventLog,
    dfg: &PerformanceDfg,
) -> std::fmt::Result {
    writeln!(out, "=== Variant: {} ===", record.variant)?;
    writeln!(
        out,
        "{} cases, avg duration {:.2} hours",
        record.count,
        hours2(record.avg_duration)
    )?;
    writeln!(out)?;

    writeln!(out, "Cases:")?;
    for trace in sub_log {
        let span = trace.duration_secs().map_or(0.0, hours2);
        writeln!(out, "- {} ({:.2} hours)", trace.case_id(), span)?;
    }
    writeln!(out)?;

    writeln!(out, "Transitions:")?;
    writeln!(out, "    freq  mean(h) median(h) transition")?;
    for edge in dfg.edges() {
        writeln!(
            out,
            "{:>8} {:>8.2} {:>9.2} {}",
            edge.frequency,
            hours2(edge.stats.mean),
            hours2(edge.stats.median),
            edge.transition
        )?;
    }

    Ok(())
}
