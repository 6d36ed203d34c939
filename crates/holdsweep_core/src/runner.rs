//! Repeated buy-and-hold backtests over sampled start dates.
//!
//! Parameters are validated before any trial runs. A trial whose prices
//! cannot be resolved becomes an `Omission`; the run carries on and the
//! report counts it. Results keep sampling order in both execution modes.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{MissingDataError, SweepError};
use crate::model::{
    HoldingPeriod, Omission, ResultsTable, SamplingWindow, SweepReport, Trial, TrialResult,
};
use crate::provider::PriceSeriesProvider;
use crate::sampler::DateSampler;
use crate::simulator::{LookupPolicy, simulate_trial};

/// How trials are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// Runs trials on the rayon pool; sequential when built without `parallel`
    Parallel,
}

/// Runs one trial per sampled start date and collects the outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestRunner {
    pub sampler: DateSampler,
    pub window: SamplingWindow,
    pub lookup: LookupPolicy,
    pub execution: ExecutionMode,
}

impl BacktestRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: DateSampler) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: SamplingWindow) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    #[must_use]
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Backtest `count` start dates sampled after `anchor`.
    ///
    /// Fails only on invalid parameters. Missing prices are reported as
    /// omissions in the returned report.
    pub fn run<P>(
        &self,
        anchor: Date,
        count: usize,
        holding_period: HoldingPeriod,
        provider: &P,
    ) -> Result<SweepReport, SweepError>
    where
        P: PriceSeriesProvider + Sync + ?Sized,
    {
        let start_dates = self.sampler.sample(anchor, count, self.window)?;
        let trials = start_dates
            .into_iter()
            .map(|start| Trial::new(start, holding_period))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            %anchor,
            count,
            holding_months = holding_period.months(),
            execution = ?self.execution,
            "Starting backtest sweep"
        );

        let outcomes = self.run_trials(&trials, provider);

        let mut rows = Vec::with_capacity(outcomes.len());
        let mut omissions = Vec::new();
        for (trial, outcome) in trials.iter().zip(outcomes) {
            match outcome {
                Ok(result) => {
                    tracing::debug!(
                        start = %trial.start_date,
                        end = %trial.end_date,
                        total_return = result.total_return,
                        "Trial completed"
                    );
                    rows.push(result);
                }
                Err(reason) => {
                    tracing::warn!(
                        start = %trial.start_date,
                        end = %trial.end_date,
                        %reason,
                        "Trial omitted"
                    );
                    omissions.push(Omission {
                        trial: *trial,
                        reason,
                    });
                }
            }
        }

        let report = SweepReport {
            requested: count,
            results: ResultsTable::new(rows),
            omissions,
        };
        tracing::info!(
            requested = report.requested,
            completed = report.completed(),
            omitted = report.omitted(),
            "Backtest sweep finished"
        );
        Ok(report)
    }

    /// `run` with the holding period given in years, rounded to whole months.
    pub fn run_years<P>(
        &self,
        anchor: Date,
        count: usize,
        years: f64,
        provider: &P,
    ) -> Result<SweepReport, SweepError>
    where
        P: PriceSeriesProvider + Sync + ?Sized,
    {
        self.run(anchor, count, HoldingPeriod::from_years(years)?, provider)
    }

    fn run_trials<P>(
        &self,
        trials: &[Trial],
        provider: &P,
    ) -> Vec<Result<TrialResult, MissingDataError>>
    where
        P: PriceSeriesProvider + Sync + ?Sized,
    {
        match self.execution {
            ExecutionMode::Sequential => trials
                .iter()
                .map(|trial| simulate_trial(trial, provider, &self.lookup))
                .collect(),
            ExecutionMode::Parallel => self.run_trials_parallel(trials, provider),
        }
    }

    #[cfg(feature = "parallel")]
    fn run_trials_parallel<P>(
        &self,
        trials: &[Trial],
        provider: &P,
    ) -> Vec<Result<TrialResult, MissingDataError>>
    where
        P: PriceSeriesProvider + Sync + ?Sized,
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        // Indexed collect keeps sampling order regardless of completion order
        trials
            .par_iter()
            .map(|trial| simulate_trial(trial, provider, &self.lookup))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_trials_parallel<P>(
        &self,
        trials: &[Trial],
        provider: &P,
    ) -> Vec<Result<TrialResult, MissingDataError>>
    where
        P: PriceSeriesProvider + Sync + ?Sized,
    {
        trials
            .iter()
            .map(|trial| simulate_trial(trial, provider, &self.lookup))
            .collect()
    }
}
