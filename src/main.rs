use anyhow::{Context, Result};
use clap::Parser;
use procmine::bottleneck::{parse_transition_times, TransitionTimes};
use procmine::cli::{Cli, OutputFormat};
use procmine::config::AnalysisConfig;
use procmine::dfg::discover_performance_dfg;
use procmine::event::EventLog;
use procmine::json_output::JsonOutput;
use procmine::pipeline::{analyze_log, AnalysisReport};
use procmine::variants::filter_variant;
use procmine::{csv_output, ingest, report, trace_builder};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let config = args.analysis_config(base);
    config.validate()?;
    Ok(config)
}

fn load_transitions(args: &Cli) -> Result<Option<TransitionTimes>> {
    let Some(path) = &args.transitions else {
        return Ok(None);
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transitions file: {}", path.display()))?;
    let times = parse_transition_times(&json)
        .with_context(|| format!("Failed to parse transitions file: {}", path.display()))?;
    Ok(Some(times))
}

/// Print the report in the requested format
fn print_report(args: &Cli, report: &AnalysisReport) -> Result<()> {
    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(report)),
        OutputFormat::Json => println!("{}", JsonOutput::new(report).to_json()?),
        OutputFormat::Csv => {
            let stdout = std::io::stdout();
            csv_output::write_table(report, args.table, stdout.lock())?;
        }
    }
    Ok(())
}

/// Print one variant (by frequency rank) and its measured transitions
///
/// With `--format csv` the selected table is exported for the variant's
/// cases only.
fn print_variant(
    args: &Cli,
    config: &AnalysisConfig,
    log: &EventLog,
    report: &AnalysisReport,
    rank: usize,
) -> Result<()> {
    let Some(record) = rank
        .checked_sub(1)
        .and_then(|idx| report.variants.records.get(idx))
    else {
        anyhow::bail!(
            "No variant at rank {} ({} variants found)",
            rank,
            report.variants.records.len()
        );
    };

    let sub_log = filter_variant(log, &record.variant);
    let dfg = discover_performance_dfg(&sub_log);

    match args.format {
        OutputFormat::Json => {
            let detail = serde_json::json!({
                "variant": record,
                "transitions": dfg.edges(),
            });
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        OutputFormat::Csv => {
            let sub_report = analyze_log(&sub_log, None, config);
            let stdout = std::io::stdout();
            csv_output::write_table(&sub_report, args.table, stdout.lock())?;
        }
        OutputFormat::Text => {
            print!("{}", report::render_variant(record, &sub_log, &dfg));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let transitions = load_transitions(&args)?;

    let records = ingest::read_records_from_path(&args.log, &args.column_mapping())
        .with_context(|| format!("Failed to read event log: {}", args.log.display()))?;
    let log = trace_builder::build_event_log(records, &config.trace_builder())?;

    let report = analyze_log(&log, transitions.as_ref(), &config);

    match args.variant {
        Some(rank) => print_variant(&args, &config, &log, &report, rank)?,
        None => print_report(&args, &report)?,
    }

    std::io::stdout().flush()?;
    Ok(())
}
