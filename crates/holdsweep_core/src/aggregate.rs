//! Summary statistics over a results table.

use crate::error::SweepError;
use crate::model::{ResultsTable, SummaryStatistics, TrialResult};

/// Summarize completed trials.
///
/// Uses population statistics. Quantiles interpolate linearly between the
/// closest ranks. Row order does not affect the result.
pub fn summarize(table: &ResultsTable) -> Result<SummaryStatistics, SweepError> {
    if table.is_empty() {
        return Err(SweepError::EmptyResults);
    }

    let n = table.len() as f64;
    let mut returns: Vec<f64> = table.total_returns().collect();
    returns.sort_by(f64::total_cmp);

    let min = returns[0];
    let max = returns[returns.len() - 1];
    // Rounding in the sum can push an all-equal mean one ulp outside the range
    let mean_return = (returns.iter().sum::<f64>() / n).clamp(min, max);
    let variance = returns
        .iter()
        .map(|r| (r - mean_return).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    let q1 = quantile_sorted(&returns, 0.25);
    let median_return = quantile_sorted(&returns, 0.5);
    let q3 = quantile_sorted(&returns, 0.75);

    let positive_fraction = returns.iter().filter(|r| **r > 0.0).count() as f64 / n;

    Ok(SummaryStatistics {
        count: table.len(),
        mean_return,
        median_return,
        std_dev,
        q1,
        q3,
        iqr: q3 - q1,
        min,
        max,
        positive_fraction,
        mean_annualized_return: mean_by(table, |r| r.annualized_return),
        mean_log_return: mean_by(table, |r| r.log_return),
        mean_max_drawdown: mean_by(table, |r| r.max_drawdown),
        worst_max_drawdown: table.iter().map(|r| r.max_drawdown).fold(0.0, f64::max),
    })
}

fn mean_by(table: &ResultsTable, f: impl Fn(&TrialResult) -> f64) -> f64 {
    table.iter().map(f).sum::<f64>() / table.len() as f64
}

/// Quantile `q` in [0, 1] of an ascending slice, NaN when it is empty.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
