//! Single-path buy-and-hold simulation.
//!
//! Entry uses the first trading day at or after the trial start, exit uses
//! the last trading day at or before the trial end. Both searches are
//! bounded by a `LookupPolicy`, so a gap in the data never silently pulls a
//! price from outside the holding window.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{MissingDataError, PriceSide, SweepError};
use crate::model::{HoldingPeriod, PricePoint, Trial, TrialResult};
use crate::provider::PriceSeriesProvider;

/// How far the simulator may look for a trading day around a trial boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPolicy {
    /// Days after the start date searched for an entry price
    pub max_forward_days: u16,
    /// Days before the end date searched for an exit price
    pub max_backward_days: u16,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            max_forward_days: 7,
            max_backward_days: 7,
        }
    }
}

impl LookupPolicy {
    #[must_use]
    pub fn new(max_forward_days: u16, max_backward_days: u16) -> Self {
        Self {
            max_forward_days,
            max_backward_days,
        }
    }

    /// Exact-date lookups only
    #[must_use]
    pub fn exact() -> Self {
        Self::new(0, 0)
    }
}

/// Run one trial starting on `start_date`.
pub fn simulate<P: PriceSeriesProvider + ?Sized>(
    start_date: Date,
    holding_period: HoldingPeriod,
    provider: &P,
    lookup: &LookupPolicy,
) -> Result<TrialResult, SweepError> {
    let trial = Trial::new(start_date, holding_period)?;
    Ok(simulate_trial(&trial, provider, lookup)?)
}

/// Run an already-built trial.
pub fn simulate_trial<P: PriceSeriesProvider + ?Sized>(
    trial: &Trial,
    provider: &P,
    lookup: &LookupPolicy,
) -> Result<TrialResult, MissingDataError> {
    let entry = provider
        .price_at_or_after(trial.start_date, lookup.max_forward_days)
        .ok_or(MissingDataError::NoPrice {
            side: PriceSide::Entry,
            requested: trial.start_date,
            max_days: lookup.max_forward_days,
        })?;
    let exit = provider
        .price_at_or_before(trial.end_date, lookup.max_backward_days)
        .ok_or(MissingDataError::NoPrice {
            side: PriceSide::Exit,
            requested: trial.end_date,
            max_days: lookup.max_backward_days,
        })?;
    if exit.date <= entry.date {
        return Err(MissingDataError::EmptyHoldingWindow {
            entry: entry.date,
            exit: exit.date,
        });
    }

    let growth = exit.price / entry.price;
    let path = provider.prices_between(entry.date, exit.date);

    Ok(TrialResult {
        trial: *trial,
        entry,
        exit,
        total_return: growth - 1.0,
        log_return: growth.ln(),
        annualized_return: growth.powf(1.0 / trial.holding_period.years()) - 1.0,
        max_drawdown: max_drawdown(&path),
    })
}

/// Largest fractional decline from a running peak, 0.0 for a monotone path.
pub fn max_drawdown(path: &[PricePoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for p in path {
        peak = peak.max(p.price);
        if peak > 0.0 {
            worst = worst.max(1.0 - p.price / peak);
        }
    }
    worst
}
