//! One command-line run, from argument values to printed and exported results.

use color_eyre::eyre::{WrapErr, bail};
use holdsweep_core::SweepError;

use crate::cli::Args;
use crate::config::RunFile;
use crate::export::export_all;
use crate::prices::load_price_csv;
use crate::report::format_report;

/// Load settings and prices, run the sweep, print the report and write the
/// outputs.
///
/// When every trial is omitted the outputs are still written and the run
/// then fails with `EmptyResults`.
pub fn run(args: &Args) -> color_eyre::Result<()> {
    let file = match &args.config {
        Some(path) => RunFile::load(path)?,
        None => RunFile::default(),
    };
    let run_file = file.merged_with(args.overrides());

    let series = load_price_csv(&args.prices, run_file.price_column())?;
    let settings = run_file.into_settings(series.first_date())?;

    let report = settings
        .runner
        .run(
            settings.anchor,
            settings.trials,
            settings.holding_period,
            &series,
        )
        .wrap_err("backtest sweep failed")?;

    let summary = match report.summarize() {
        Ok(summary) => Some(summary),
        Err(SweepError::EmptyResults) => None,
        Err(e) => return Err(e.into()),
    };

    print!("{}", format_report(&settings, &report, summary.as_ref()));

    if let Some(out_dir) = &args.out_dir {
        export_all(out_dir, &settings, &report, summary)?;
    }

    tracing::info!("holdsweep finished");

    if summary.is_none() {
        bail!("{} ({} trials omitted)", SweepError::EmptyResults, report.omitted());
    }
    Ok(())
}
