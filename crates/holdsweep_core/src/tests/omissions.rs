//! Trials lost to missing data and coverage reporting

use jiff::civil::{Date, date};

use super::linear_daily;
use crate::error::{MissingDataError, ParameterError, PriceSide, SweepError};
use crate::model::{HoldingPeriod, SamplingWindow};
use crate::provider::PriceSeries;
use crate::runner::{BacktestRunner, ExecutionMode};
use crate::simulator::LookupPolicy;

/// No prices after 2020-01-01
fn data_until_2020() -> PriceSeries {
    linear_daily(date(2010, 1, 1), date(2020, 1, 1))
}

#[test]
fn test_trials_past_end_of_data_are_omitted() {
    let series = data_until_2020();
    let report = BacktestRunner::new()
        .with_window(SamplingWindow::Months(12))
        .run(
            date(2015, 7, 1),
            12,
            HoldingPeriod::from_whole_years(4).unwrap(),
            &series,
        )
        .unwrap();

    // Starts through 2015-12-31 exit by 2020-01-01, later ones run off the data
    assert_eq!(report.requested, 12);
    assert_eq!(report.completed(), 7);
    assert_eq!(report.omitted(), 5);
    assert_eq!(report.completed() + report.omitted(), report.requested);
    assert!((report.coverage() - 7.0 / 12.0).abs() < 1e-12);

    assert_eq!(
        report.results.rows().last().map(|r| r.start_date()),
        Some(date(2015, 12, 31))
    );
    for omission in &report.omissions {
        assert!(omission.trial.end_date > date(2020, 1, 1));
        assert!(matches!(
            omission.reason,
            MissingDataError::NoPrice {
                side: PriceSide::Exit,
                ..
            }
        ));
    }

    let summary = report.summarize().unwrap();
    assert_eq!(summary.count, 7);
}

#[test]
fn test_omissions_identical_in_parallel() {
    let series = data_until_2020();
    let runner = BacktestRunner::new().with_window(SamplingWindow::Months(12));
    let holding = HoldingPeriod::from_whole_years(4).unwrap();
    let sequential = runner.run(date(2015, 7, 1), 12, holding, &series).unwrap();
    let parallel = runner
        .with_execution(ExecutionMode::Parallel)
        .run(date(2015, 7, 1), 12, holding, &series)
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_all_trials_omitted_is_empty_results() {
    let series = data_until_2020();
    let report = BacktestRunner::new()
        .run(
            date(2018, 1, 1),
            5,
            HoldingPeriod::from_whole_years(5).unwrap(),
            &series,
        )
        .unwrap();
    assert_eq!(report.completed(), 0);
    assert_eq!(report.omitted(), 5);
    assert_eq!(report.coverage(), 0.0);
    assert_eq!(report.summarize(), Err(SweepError::EmptyResults));
}

#[test]
fn test_entry_before_data_is_omitted() {
    let series = data_until_2020();
    // Window straddles the first price on 2010-01-01
    let report = BacktestRunner::new()
        .with_window(SamplingWindow::Days(20))
        .run(
            date(2009, 12, 12),
            20,
            HoldingPeriod::from_whole_years(1).unwrap(),
            &series,
        )
        .unwrap();
    // 2009-12-12..=2009-12-24 cannot reach 2010-01-01 within 7 days
    assert_eq!(report.omitted(), 13);
    assert_eq!(report.completed(), 7);
    assert!(report.omissions.iter().all(|o| matches!(
        o.reason,
        MissingDataError::NoPrice {
            side: PriceSide::Entry,
            ..
        }
    )));
}

#[test]
fn test_wide_lookups_at_the_end_of_the_calendar() {
    let series =
        PriceSeries::from_fn("late", date(9998, 1, 1), Date::MAX, |_| Some(10.0)).unwrap();
    let runner = BacktestRunner::new()
        .with_window(SamplingWindow::Days(30))
        .with_lookup(LookupPolicy::new(u16::MAX, 7));
    let holding = HoldingPeriod::from_whole_years(1).unwrap();

    let report = runner.run(date(9998, 6, 1), 3, holding, &series).unwrap();
    assert_eq!(report.completed(), 3);

    // Trial ends past 9999-12-31 are rejected, not resolved
    let err = runner.run(date(9999, 6, 1), 3, holding, &series).unwrap_err();
    assert!(matches!(
        err,
        SweepError::InvalidParameter(ParameterError::DateOutOfRange { .. })
    ));
}

#[test]
fn test_wide_lookups_at_the_start_of_the_calendar() {
    let series = linear_daily(date(1, 1, 1), date(1, 1, 31));
    let report = BacktestRunner::new()
        .with_window(SamplingWindow::Days(10))
        .with_lookup(LookupPolicy::new(7, u16::MAX))
        .run(
            date(1, 1, 1),
            3,
            HoldingPeriod::from_months(1).unwrap(),
            &series,
        )
        .unwrap();

    assert_eq!(report.completed(), 3);
    assert!(
        report
            .results
            .iter()
            .all(|r| r.exit.date == date(1, 1, 31))
    );
}
