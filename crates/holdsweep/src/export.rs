//! Sweep artifacts: CSV tables for spreadsheets and a JSON report.
//!
//! - `results.csv`: one row per completed trial, in sampling order
//! - `omissions.csv`: trials dropped for missing data, with the reason
//! - `report.json`: settings, counts, summary and both tables

use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use holdsweep_core::{Omission, ResultsTable, SummaryStatistics, SweepReport};
use serde::Serialize;

use crate::config::Settings;

pub const RESULTS_FILE: &str = "results.csv";
pub const OMISSIONS_FILE: &str = "omissions.csv";
pub const REPORT_FILE: &str = "report.json";

/// Write the results table as CSV.
pub fn write_results_csv<W: Write>(writer: W, results: &ResultsTable) -> color_eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "trial",
        "start_date",
        "end_date",
        "entry_date",
        "entry_price",
        "exit_date",
        "exit_price",
        "total_return",
        "log_return",
        "annualized_return",
        "max_drawdown",
    ])?;
    for (i, r) in results.iter().enumerate() {
        wtr.write_record([
            &i.to_string(),
            &r.start_date().to_string(),
            &r.end_date().to_string(),
            &r.entry.date.to_string(),
            &r.entry.price.to_string(),
            &r.exit.date.to_string(),
            &r.exit.price.to_string(),
            &format!("{:.6}", r.total_return),
            &format!("{:.6}", r.log_return),
            &format!("{:.6}", r.annualized_return),
            &format!("{:.6}", r.max_drawdown),
        ])?;
    }
    wtr.flush().wrap_err("failed to flush CSV writer")?;
    Ok(())
}

/// Write omitted trials as CSV.
pub fn write_omissions_csv<W: Write>(writer: W, omissions: &[Omission]) -> color_eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["start_date", "end_date", "reason"])?;
    for o in omissions {
        wtr.write_record([
            &o.trial.start_date.to_string(),
            &o.trial.end_date.to_string(),
            &o.reason.to_string(),
        ])?;
    }
    wtr.flush().wrap_err("failed to flush CSV writer")?;
    Ok(())
}

/// JSON form of a finished sweep
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub settings: &'a Settings,
    pub requested: usize,
    pub completed: usize,
    pub omitted: usize,
    pub coverage: f64,
    /// Absent when every trial was omitted
    pub summary: Option<SummaryStatistics>,
    pub results: &'a ResultsTable,
    pub omissions: &'a [Omission],
}

impl<'a> ReportDocument<'a> {
    pub fn new(
        settings: &'a Settings,
        report: &'a SweepReport,
        summary: Option<SummaryStatistics>,
    ) -> Self {
        Self {
            settings,
            requested: report.requested,
            completed: report.completed(),
            omitted: report.omitted(),
            coverage: report.coverage(),
            summary,
            results: &report.results,
            omissions: &report.omissions,
        }
    }
}

/// Write `results.csv`, `omissions.csv` and `report.json` into `out_dir`.
///
/// Returns the paths written.
pub fn export_all(
    out_dir: &Path,
    settings: &Settings,
    report: &SweepReport,
    summary: Option<SummaryStatistics>,
) -> color_eyre::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("failed to create output dir {}", out_dir.display()))?;

    let results_path = out_dir.join(RESULTS_FILE);
    write_results_csv(create(&results_path)?, &report.results)?;

    let omissions_path = out_dir.join(OMISSIONS_FILE);
    write_omissions_csv(create(&omissions_path)?, &report.omissions)?;

    let report_path = out_dir.join(REPORT_FILE);
    let document = ReportDocument::new(settings, report, summary);
    let mut file = create(&report_path)?;
    serde_json::to_writer_pretty(&mut file, &document)
        .wrap_err("failed to serialize report to JSON")?;
    file.flush()?;

    let written = vec![results_path, omissions_path, report_path];
    for path in &written {
        tracing::info!(path = %path.display(), "Wrote output");
    }
    Ok(written)
}

fn create(path: &Path) -> color_eyre::Result<std::io::BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;
    Ok(std::io::BufWriter::new(file))
}
