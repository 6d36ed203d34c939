use std::fmt;

use jiff::civil::Date;

/// Errors raised while validating sweep inputs, before any trial runs
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Trial count must be at least one
    ZeroCount,
    /// Sampling window must span at least one day
    NonPositiveWindow,
    /// Holding period must be at least one month
    NonPositiveHoldingPeriod,
    /// Holding period does not fit in a month count
    HoldingPeriodTooLong { years: f64 },
    /// The window holds fewer days than the requested number of distinct dates
    WindowTooShort { days: i32, count: usize },
    /// Date string is not `YYYY-MM-DD` or `YYYYMMDD`
    MalformedDate(String),
    /// Date arithmetic left the supported calendar range
    DateOutOfRange { date: Date, months: i32 },
    /// Price series contains the same date twice
    DuplicatePriceDate(Date),
    /// Price is zero, negative, or not finite
    InvalidPrice { date: Date, price: f64 },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::ZeroCount => write!(f, "trial count must be at least 1"),
            ParameterError::NonPositiveWindow => {
                write!(f, "sampling window must span at least one day")
            }
            ParameterError::NonPositiveHoldingPeriod => {
                write!(f, "holding period must be at least one month")
            }
            ParameterError::HoldingPeriodTooLong { years } => {
                write!(f, "holding period of {years} years is too long")
            }
            ParameterError::WindowTooShort { days, count } => write!(
                f,
                "sampling window of {days} days cannot hold {count} distinct start dates"
            ),
            ParameterError::MalformedDate(s) => {
                write!(f, "malformed date {s:?} (expected YYYY-MM-DD or YYYYMMDD)")
            }
            // Day-based windows report no month offset
            ParameterError::DateOutOfRange { date, months: 0 } => {
                write!(f, "{date} plus the sampling window is out of range")
            }
            ParameterError::DateOutOfRange { date, months } => {
                write!(f, "{date} shifted by {months} months is out of range")
            }
            ParameterError::DuplicatePriceDate(date) => {
                write!(f, "price series has more than one price for {date}")
            }
            ParameterError::InvalidPrice { date, price } => {
                write!(f, "invalid price {price} on {date}")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Which side of a trial a price lookup was resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PriceSide {
    Entry,
    Exit,
}

impl fmt::Display for PriceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSide::Entry => write!(f, "entry"),
            PriceSide::Exit => write!(f, "exit"),
        }
    }
}

/// A trial whose prices could not be resolved
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MissingDataError {
    /// No price within `max_days` of the requested date
    NoPrice {
        side: PriceSide,
        requested: Date,
        max_days: u16,
    },
    /// Entry and exit resolved to the same or inverted dates
    EmptyHoldingWindow { entry: Date, exit: Date },
}

impl fmt::Display for MissingDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingDataError::NoPrice {
                side: PriceSide::Entry,
                requested,
                max_days,
            } => write!(
                f,
                "no entry price on or within {max_days} days after {requested}"
            ),
            MissingDataError::NoPrice {
                side: PriceSide::Exit,
                requested,
                max_days,
            } => write!(
                f,
                "no exit price on or within {max_days} days before {requested}"
            ),
            MissingDataError::EmptyHoldingWindow { entry, exit } => {
                write!(f, "exit price date {exit} is not after entry {entry}")
            }
        }
    }
}

impl std::error::Error for MissingDataError {}

/// Top-level error for sampling, simulation and aggregation
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    InvalidParameter(ParameterError),
    MissingData(MissingDataError),
    /// Every trial was omitted, nothing to summarize
    EmptyResults,
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            SweepError::MissingData(e) => write!(f, "missing data: {e}"),
            SweepError::EmptyResults => write!(f, "no completed trials to summarize"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::InvalidParameter(e) => Some(e),
            SweepError::MissingData(e) => Some(e),
            SweepError::EmptyResults => None,
        }
    }
}

impl From<ParameterError> for SweepError {
    fn from(e: ParameterError) -> Self {
        SweepError::InvalidParameter(e)
    }
}

impl From<MissingDataError> for SweepError {
    fn from(e: MissingDataError) -> Self {
        SweepError::MissingData(e)
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_missing_data_messages_name_the_side() {
        let entry = MissingDataError::NoPrice {
            side: PriceSide::Entry,
            requested: date(2020, 1, 4),
            max_days: 7,
        };
        let exit = MissingDataError::NoPrice {
            side: PriceSide::Exit,
            requested: date(2023, 1, 4),
            max_days: 3,
        };
        assert_eq!(
            entry.to_string(),
            "no entry price on or within 7 days after 2020-01-04"
        );
        assert_eq!(
            exit.to_string(),
            "no exit price on or within 3 days before 2023-01-04"
        );
    }

    #[test]
    fn test_sweep_error_source_chain() {
        use std::error::Error;

        let err: SweepError = ParameterError::ZeroCount.into();
        assert!(matches!(err, SweepError::InvalidParameter(_)));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("trial count must be at least 1".to_string())
        );
        assert!(SweepError::EmptyResults.source().is_none());
    }
}
