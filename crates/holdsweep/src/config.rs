//! Run settings: built-in defaults, then the YAML run file, then the
//! command line.

use std::path::Path;

use color_eyre::eyre::{WrapErr, bail, eyre};
use holdsweep_core::date_math::parse_date;
use holdsweep_core::{
    BacktestRunner, DateSampler, ExecutionMode, HoldingPeriod, LookupPolicy, SamplingWindow,
};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIALS: usize = 100;
pub const DEFAULT_YEARS: f64 = 3.0;
pub const DEFAULT_PRICE_COLUMN: &str = "close";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingChoice {
    Even,
    Random,
}

/// Contents of a YAML run file. Every field is optional.
///
/// A `seed` without `sampling` selects random sampling; with
/// `sampling: even` the seed is ignored.
///
/// ```yaml
/// anchor: 2016-01-01
/// trials: 100
/// years: 3
/// window_months: 6
/// sampling: random
/// seed: 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunFile {
    pub anchor: Option<String>,
    pub trials: Option<usize>,
    pub years: Option<f64>,
    pub window_months: Option<u32>,
    pub window_days: Option<u32>,
    pub sampling: Option<SamplingChoice>,
    pub seed: Option<u64>,
    pub max_forward_days: Option<u16>,
    pub max_backward_days: Option<u16>,
    pub parallel: Option<bool>,
    pub price_column: Option<String>,
}

impl RunFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read run file {}", path.display()))?;
        Self::from_yaml(&content)
            .map_err(|e| eyre!("failed to parse run file {}: {e}", path.display()))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    ///
    /// A window given in either unit replaces the whole window setting.
    #[must_use]
    pub fn merged_with(self, overrides: RunFile) -> RunFile {
        let window_overridden =
            overrides.window_months.is_some() || overrides.window_days.is_some();
        let (window_months, window_days) = if window_overridden {
            (overrides.window_months, overrides.window_days)
        } else {
            (self.window_months, self.window_days)
        };
        RunFile {
            anchor: overrides.anchor.or(self.anchor),
            trials: overrides.trials.or(self.trials),
            years: overrides.years.or(self.years),
            window_months,
            window_days,
            sampling: overrides.sampling.or(self.sampling),
            seed: overrides.seed.or(self.seed),
            max_forward_days: overrides.max_forward_days.or(self.max_forward_days),
            max_backward_days: overrides.max_backward_days.or(self.max_backward_days),
            parallel: overrides.parallel.or(self.parallel),
            price_column: overrides.price_column.or(self.price_column),
        }
    }

    /// Price column to read, before prices are loaded.
    #[must_use]
    pub fn price_column(&self) -> &str {
        self.price_column.as_deref().unwrap_or(DEFAULT_PRICE_COLUMN)
    }

    /// Resolve into validated settings. `default_anchor` is used when no
    /// anchor was given (normally the first date of the price history).
    pub fn into_settings(self, default_anchor: Option<Date>) -> color_eyre::Result<Settings> {
        let anchor = match self.anchor.as_deref() {
            Some(s) => parse_date(s)?,
            None => default_anchor
                .ok_or_else(|| eyre!("no anchor date given and the price history is empty"))?,
        };

        let window = match (self.window_months, self.window_days) {
            (Some(_), Some(_)) => bail!("set only one of window_months and window_days"),
            (_, Some(days)) => SamplingWindow::Days(days),
            (Some(months), None) => SamplingWindow::Months(months),
            (None, None) => SamplingWindow::default(),
        };

        let sampler = match (self.sampling, self.seed) {
            (Some(SamplingChoice::Random), Some(seed)) => DateSampler::random(seed),
            (Some(SamplingChoice::Random), None) => bail!("random sampling requires a seed"),
            (None, Some(seed)) => DateSampler::random(seed),
            (Some(SamplingChoice::Even), Some(_)) => {
                tracing::warn!("Seed ignored with even sampling");
                DateSampler::even()
            }
            (_, None) => DateSampler::even(),
        };

        let defaults = LookupPolicy::default();
        let lookup = LookupPolicy::new(
            self.max_forward_days.unwrap_or(defaults.max_forward_days),
            self.max_backward_days.unwrap_or(defaults.max_backward_days),
        );

        let execution = if self.parallel.unwrap_or(false) {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        };

        Ok(Settings {
            anchor,
            trials: self.trials.unwrap_or(DEFAULT_TRIALS),
            holding_period: HoldingPeriod::from_years(self.years.unwrap_or(DEFAULT_YEARS))?,
            runner: BacktestRunner::new()
                .with_sampler(sampler)
                .with_window(window)
                .with_lookup(lookup)
                .with_execution(execution),
        })
    }
}

/// Fully resolved parameters for one sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub anchor: Date,
    pub trials: usize,
    pub holding_period: HoldingPeriod,
    pub runner: BacktestRunner,
}
