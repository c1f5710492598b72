//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - loads the indicator store once
//! - runs the requested query and prints text or JSON
//! - writes optional exports

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CorrelateArgs, SeriesArgs, StatsArgs};
use crate::data::IndicatorStore;
use crate::error::AppError;

pub mod service;

use service::SeriesQuery;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is fine; the environment and flags still apply.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    init_logging(cli.verbose);
    debug!(data_dir = %cli.data_dir.display(), "starting");

    let store = IndicatorStore::load(&cli.data_dir)?;

    match cli.command {
        Command::Indicators(out) => {
            let list = service::list_indicators(&store);
            emit(out.json, &list, || crate::report::format_indicators(&list))
        }
        Command::Series(args) => handle_series(&store, args),
        Command::Stats(args) => handle_stats(&store, args),
        Command::Correlate(args) => handle_correlate(&store, args),
        Command::Summary(out) => {
            let entries = service::summary(&store);
            emit(out.json, &entries, || crate::report::format_summary(&entries))
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr so stdout stays clean for JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_series(store: &IndicatorStore, args: SeriesArgs) -> Result<(), AppError> {
    let query = SeriesQuery {
        column: args.column,
        window: args.window,
        start: args.start,
        end: args.end,
        filters: args.filters,
        moving_average: args.moving_average,
    };
    let series = service::get_series(store, &args.indicator, &query)?;

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &series)?;
        info!(path = %path.display(), rows = series.values.len(), "exported series");
    }

    emit(args.output.json, &series, || crate::report::format_series(&series))
}

fn handle_stats(store: &IndicatorStore, args: StatsArgs) -> Result<(), AppError> {
    let stats = service::get_statistics(store, &args.indicator, args.column.as_deref())?;
    emit(args.output.json, &stats, || crate::report::format_statistics(&stats))
}

fn handle_correlate(store: &IndicatorStore, args: CorrelateArgs) -> Result<(), AppError> {
    let inputs = if args.inputs.is_empty() {
        service::default_correlation_inputs()
    } else {
        args.inputs
    };
    let matrix = service::get_correlation(store, &inputs)?;
    emit(args.output.json, &matrix, || crate::report::format_correlation(&matrix))
}

/// Print either pretty JSON or the text rendering.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), AppError> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::output(format!("Failed to serialize JSON: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", text());
    }
    Ok(())
}
