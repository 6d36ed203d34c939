//! Entry-timing sensitivity for buy-and-hold positions
//!
//! This crate backtests a buy-and-hold position from many start dates with a
//! fixed holding period and summarizes the spread of outcomes:
//! - Calendar-correct date arithmetic (month-end clamping, leap years)
//! - Evenly spaced or seeded random start-date sampling
//! - Bounded nearest-trading-day price resolution
//! - Omission tracking for trials with missing data
//! - Population summary statistics over completed trials
//!
//! ```ignore
//! use holdsweep_core::{BacktestRunner, HoldingPeriod, PriceSeries, SamplingWindow};
//!
//! let series = PriceSeries::new("SPX", points)?;
//! let report = BacktestRunner::new()
//!     .with_window(SamplingWindow::Months(6))
//!     .run(anchor, 100, HoldingPeriod::from_whole_years(3)?, &series)?;
//! let summary = report.summarize()?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod date_math;
pub mod error;
pub mod provider;
pub mod runner;
pub mod sampler;
pub mod simulator;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::summarize;
pub use error::{MissingDataError, ParameterError, PriceSide, SweepError};
pub use model::{
    HoldingPeriod, Omission, PricePoint, ResultsTable, SamplingWindow, SummaryStatistics,
    SweepReport, Trial, TrialResult,
};
pub use provider::{PriceSeries, PriceSeriesProvider};
pub use runner::{BacktestRunner, ExecutionMode};
pub use sampler::{DateSampler, SamplingPolicy};
pub use simulator::{LookupPolicy, simulate};
