//! Console summary of a finished sweep.

use std::fmt::Write;

use holdsweep_core::{SummaryStatistics, SweepReport};

use crate::config::Settings;

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Render the run parameters, trial counts and the return distribution.
pub fn format_report(
    settings: &Settings,
    report: &SweepReport,
    summary: Option<&SummaryStatistics>,
) -> String {
    let mut out = String::new();
    let hp = settings.holding_period;
    let _ = writeln!(
        out,
        "Buy-and-hold sweep from {} ({} months held, {:?} sampling)",
        settings.anchor,
        hp.months(),
        settings.runner.sampler.policy,
    );
    let _ = writeln!(
        out,
        "Trials: {} requested, {} completed, {} omitted ({} coverage)",
        report.requested,
        report.completed(),
        report.omitted(),
        format_percentage(report.coverage()),
    );

    let Some(s) = summary else {
        let _ = writeln!(out, "No completed trials to summarize");
        return out;
    };

    let rows = [
        ("Mean return", s.mean_return),
        ("Median return", s.median_return),
        ("Std deviation", s.std_dev),
        ("Q1", s.q1),
        ("Q3", s.q3),
        ("IQR", s.iqr),
        ("Min", s.min),
        ("Max", s.max),
        ("Positive", s.positive_fraction),
        ("Mean annualized", s.mean_annualized_return),
        ("Mean log return", s.mean_log_return),
        ("Mean max drawdown", s.mean_max_drawdown),
        ("Worst max drawdown", s.worst_max_drawdown),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<20}{:>10}", format_percentage(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunFile;
    use holdsweep_core::ResultsTable;
    use jiff::civil::date;

    fn settings() -> Settings {
        RunFile::default()
            .into_settings(Some(date(2016, 1, 1)))
            .unwrap()
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.1234), "12.34%");
        assert_eq!(format_percentage(-0.05), "-5.00%");
    }

    #[test]
    fn test_report_without_results() {
        let report = SweepReport {
            requested: 5,
            results: ResultsTable::default(),
            omissions: Vec::new(),
        };
        let text = format_report(&settings(), &report, None);
        assert!(text.contains("5 requested, 0 completed, 0 omitted"));
        assert!(text.contains("No completed trials"));
    }
}
