//! Sweep results, coverage counts and summary statistics
//!
//! A `SweepReport` is produced once per run and only read afterwards.

use serde::{Deserialize, Serialize};

use super::trial::{Omission, TrialResult};
use crate::aggregate;
use crate::error::SweepError;

/// Completed trials in sampling order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rows: Vec<TrialResult>,
}

impl ResultsTable {
    #[must_use]
    pub fn new(rows: Vec<TrialResult>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialResult> {
        self.rows.iter()
    }

    #[must_use]
    pub fn rows(&self) -> &[TrialResult] {
        &self.rows
    }

    /// Total returns in table order
    pub fn total_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.total_return)
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = &'a TrialResult;
    type IntoIter = std::slice::Iter<'a, TrialResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Everything a run produced: completed trials, omitted trials and counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Number of trials asked for
    pub requested: usize,
    pub results: ResultsTable,
    pub omissions: Vec<Omission>,
}

impl SweepReport {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn omitted(&self) -> usize {
        self.omissions.len()
    }

    /// Share of requested trials that completed (0.0 to 1.0)
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.requested == 0 {
            0.0
        } else {
            self.completed() as f64 / self.requested as f64
        }
    }

    /// Summarize the completed trials.
    pub fn summarize(&self) -> Result<SummaryStatistics, SweepError> {
        aggregate::summarize(&self.results)
    }
}

/// Distribution of outcomes across completed trials.
///
/// Spread figures are population statistics (divide by n). With a single
/// trial `std_dev` and `iqr` are 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean_return: f64,
    pub median_return: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    /// Share of trials that ended with a gain
    pub positive_fraction: f64,
    pub mean_annualized_return: f64,
    pub mean_log_return: f64,
    pub mean_max_drawdown: f64,
    pub worst_max_drawdown: f64,
}
