//! One buy-and-hold path and its outcome.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::period::HoldingPeriod;
use super::price::PricePoint;
use crate::error::{MissingDataError, ParameterError};

/// A single buy-and-hold path: buy on `start_date`, sell on `end_date`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub start_date: Date,
    pub end_date: Date,
    pub holding_period: HoldingPeriod,
}

impl Trial {
    pub fn new(start_date: Date, holding_period: HoldingPeriod) -> Result<Self, ParameterError> {
        let end_date = holding_period.end_from(start_date)?;
        Ok(Self {
            start_date,
            end_date,
            holding_period,
        })
    }
}

/// Outcome of one completed trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub trial: Trial,
    /// Price actually used to enter (first trading day at or after the start)
    pub entry: PricePoint,
    /// Price actually used to exit (last trading day at or before the end)
    pub exit: PricePoint,
    /// exit / entry - 1
    pub total_return: f64,
    /// ln(exit / entry)
    pub log_return: f64,
    /// Compound annual rate over the nominal holding period
    pub annualized_return: f64,
    /// Largest peak-to-trough decline between entry and exit, as a fraction
    pub max_drawdown: f64,
}

impl TrialResult {
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.trial.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> Date {
        self.trial.end_date
    }
}

/// A trial excluded from the results table, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Omission {
    pub trial: Trial,
    pub reason: MissingDataError,
}
