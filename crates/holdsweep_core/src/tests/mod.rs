//! Scenario tests for the sweep engine
//!
//! Tests are organized by topic:
//! - `sweep` - End-to-end sweeps over synthetic price series
//! - `omissions` - Trials lost to missing data and coverage reporting

mod omissions;

use jiff::civil::Date;

use crate::date_math::days_between;
use crate::provider::PriceSeries;

/// Daily series with price(d) = 100 + days_since(origin) / 10
pub(crate) fn linear_daily(origin: Date, last: Date) -> PriceSeries {
    PriceSeries::from_fn("linear", origin, last, |d| {
        Some(100.0 + days_between(origin, d) as f64 / 10.0)
    })
    .unwrap()
}
