//! Command-line parsing for the indicator query tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! query and analysis code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::app::service::CorrelationInput;
use crate::domain::{TagFilter, Window};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "Macroeconomic indicator series, statistics, and correlations")]
pub struct Cli {
    /// Directory holding the indicator CSV files.
    #[arg(long, global = true, env = "ECON_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available indicators and whether their data is loaded.
    Indicators(OutputArgs),
    /// Print a (filtered) series with statistics.
    Series(SeriesArgs),
    /// Print statistics for an indicator column over its full history.
    Stats(StatsArgs),
    /// Correlate indicator columns on their common dates.
    Correlate(CorrelateArgs),
    /// Latest value, change, and growth of every loaded indicator.
    Summary(OutputArgs),
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Emit JSON instead of a text table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    /// Indicator id (see `econ indicators`).
    pub indicator: String,

    /// Numeric column (defaults to the indicator's primary column).
    #[arg(short, long)]
    pub column: Option<String>,

    /// Trailing window relative to the latest observation.
    #[arg(short, long, value_enum, default_value_t = Window::All)]
    pub window: Window,

    /// Earliest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Latest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Tag filter, e.g. `Region=Urban` (repeatable).
    #[arg(short, long = "filter", value_name = "TAG=VALUE")]
    pub filters: Vec<TagFilter>,

    /// Add a trailing moving average over N periods.
    #[arg(long, value_name = "N")]
    pub moving_average: Option<usize>,

    /// Export the series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct StatsArgs {
    /// Indicator id (see `econ indicators`).
    pub indicator: String,

    /// Numeric column (defaults to the indicator's primary column).
    #[arg(short, long)]
    pub column: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CorrelateArgs {
    /// Inputs as `indicator[:column][@Tag=Value,...]`; none means the default set.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<CorrelationInput>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Indicator;

    #[test]
    fn parses_series_flags() {
        let cli = Cli::parse_from([
            "econ", "--data-dir", "/tmp/d", "series", "cpi", "-w", "1y", "-f", "Region=Urban", "--moving-average", "3",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/d"));
        let Command::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert_eq!(args.indicator, "cpi");
        assert_eq!(args.window, Window::OneYear);
        assert_eq!(args.filters, vec![TagFilter::new("Region", "Urban")]);
        assert_eq!(args.moving_average, Some(3));
        assert!(!args.output.json);
    }

    #[test]
    fn parses_correlation_inputs() {
        let cli = Cli::parse_from(["econ", "correlate", "gdp", "unemployment@State=India", "--json"]);
        let Command::Correlate(args) = cli.command else {
            panic!("expected correlate");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.inputs[1].indicator, Indicator::Unemployment);
        assert!(args.output.json);
    }

    #[test]
    fn rejects_unknown_window() {
        assert!(Cli::try_parse_from(["econ", "series", "gdp", "--window", "10y"]).is_err());
    }
}
