use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{RunFile, SamplingChoice};

#[derive(Parser, Debug)]
#[command(name = "holdsweep")]
#[command(about = "Backtest a buy-and-hold position over many start dates")]
pub struct Args {
    /// CSV file with a `date` column and a price column
    #[arg(short, long)]
    pub prices: PathBuf,

    /// YAML run file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Anchor date (YYYY-MM-DD or YYYYMMDD), default: first date in the price file
    #[arg(short, long)]
    pub anchor: Option<String>,

    /// Number of backtests to run (default: 100)
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Holding period in years, rounded to whole months (default: 3)
    #[arg(short, long)]
    pub years: Option<f64>,

    /// Sampling window length in months (default: 6)
    #[arg(long, conflicts_with = "window_days")]
    pub window_months: Option<u32>,

    /// Sampling window length in days
    #[arg(long)]
    pub window_days: Option<u32>,

    /// How start dates are spread across the window
    #[arg(long, value_enum)]
    pub sampling: Option<SamplingArg>,

    /// Seed for random sampling; selects random sampling unless `--sampling even`
    #[arg(long)]
    pub seed: Option<u64>,

    /// Days after a start date searched for an entry price (default: 7)
    #[arg(long)]
    pub max_forward_days: Option<u16>,

    /// Days before an end date searched for an exit price (default: 7)
    #[arg(long)]
    pub max_backward_days: Option<u16>,

    /// Run trials on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Name of the price column (default: close)
    #[arg(long)]
    pub price_column: Option<String>,

    /// Directory for results.csv, omissions.csv, report.json and the log file
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    Even,
    Random,
}

impl Args {
    /// Command-line values in run-file form, for layering over a loaded file.
    pub fn overrides(&self) -> RunFile {
        RunFile {
            anchor: self.anchor.clone(),
            trials: self.trials,
            years: self.years,
            window_months: self.window_months,
            window_days: self.window_days,
            sampling: self.sampling.map(|s| match s {
                SamplingArg::Even => SamplingChoice::Even,
                SamplingArg::Random => SamplingChoice::Random,
            }),
            seed: self.seed,
            max_forward_days: self.max_forward_days,
            max_backward_days: self.max_backward_days,
            parallel: self.parallel.then_some(true),
            price_column: self.price_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "holdsweep",
            "--prices",
            "spx.csv",
            "--anchor",
            "20160101",
            "-n",
            "250",
            "--years",
            "3",
            "--window-days",
            "90",
            "--sampling",
            "random",
            "--seed",
            "11",
            "--parallel",
        ])
        .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.anchor.as_deref(), Some("20160101"));
        assert_eq!(overrides.trials, Some(250));
        assert_eq!(overrides.window_days, Some(90));
        assert_eq!(overrides.sampling, Some(SamplingChoice::Random));
        assert_eq!(overrides.parallel, Some(true));
        assert_eq!(overrides.window_months, None);
    }

    #[test]
    fn test_window_flags_conflict() {
        let result = Args::try_parse_from([
            "holdsweep",
            "--prices",
            "spx.csv",
            "--window-days",
            "90",
            "--window-months",
            "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parallel_flag_absent_does_not_override() {
        let args = Args::try_parse_from(["holdsweep", "-p", "spx.csv"]).unwrap();
        assert_eq!(args.overrides().parallel, None);
        assert_eq!(args.log_level, "info");
    }
}
