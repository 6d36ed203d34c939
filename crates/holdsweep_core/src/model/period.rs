//! Calendar spans used by a sweep: the holding period of each trial and the
//! window start dates are drawn from.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{add_months, days_between};
use crate::error::ParameterError;

/// How long each trial stays invested, in whole calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingPeriod {
    months: u32,
}

impl HoldingPeriod {
    pub fn from_months(months: u32) -> Result<Self, ParameterError> {
        if months == 0 {
            return Err(ParameterError::NonPositiveHoldingPeriod);
        }
        Ok(Self { months })
    }

    pub fn from_whole_years(years: u32) -> Result<Self, ParameterError> {
        let months = years
            .checked_mul(12)
            .ok_or(ParameterError::HoldingPeriodTooLong {
                years: f64::from(years),
            })?;
        Self::from_months(months)
    }

    /// Fractional years are rounded to the nearest month (2.5 -> 30 months).
    pub fn from_years(years: f64) -> Result<Self, ParameterError> {
        if years.is_nan() || years <= 0.0 {
            return Err(ParameterError::NonPositiveHoldingPeriod);
        }
        let months = (years * 12.0).round();
        if months < 1.0 {
            return Err(ParameterError::NonPositiveHoldingPeriod);
        }
        if months > f64::from(u32::MAX) {
            return Err(ParameterError::HoldingPeriodTooLong { years });
        }
        Self::from_months(months as u32)
    }

    #[must_use]
    pub fn months(&self) -> u32 {
        self.months
    }

    #[must_use]
    pub fn years(&self) -> f64 {
        f64::from(self.months) / 12.0
    }

    /// Exit date for a position opened on `start`.
    pub fn end_from(&self, start: Date) -> Result<Date, ParameterError> {
        let months = i32::try_from(self.months).map_err(|_| ParameterError::DateOutOfRange {
            date: start,
            months: i32::MAX,
        })?;
        add_months(start, months)
    }
}

/// Span after the anchor date within which start dates are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingWindow {
    Months(u32),
    Days(u32),
}

impl Default for SamplingWindow {
    fn default() -> Self {
        SamplingWindow::Months(6)
    }
}

impl SamplingWindow {
    /// First day after the window.
    pub fn end_from(&self, anchor: Date) -> Result<Date, ParameterError> {
        match *self {
            SamplingWindow::Months(0) | SamplingWindow::Days(0) => {
                Err(ParameterError::NonPositiveWindow)
            }
            SamplingWindow::Months(m) => {
                let months = i32::try_from(m).map_err(|_| ParameterError::NonPositiveWindow)?;
                add_months(anchor, months)
            }
            SamplingWindow::Days(d) => jiff::Span::new()
                .try_days(i64::from(d))
                .and_then(|span| anchor.checked_add(span))
                .map_err(|_| ParameterError::DateOutOfRange {
                    date: anchor,
                    months: 0,
                }),
        }
    }

    /// Number of days from the anchor to the window end.
    pub fn days_from(&self, anchor: Date) -> Result<i32, ParameterError> {
        let days = days_between(anchor, self.end_from(anchor)?);
        if days <= 0 {
            return Err(ParameterError::NonPositiveWindow);
        }
        Ok(days)
    }
}
