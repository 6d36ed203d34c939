//! Price lookups consumed by the simulator.
//!
//! `PriceSeriesProvider` only requires a point lookup. The bounded
//! nearest-date searches and range queries have day-stepping defaults;
//! `PriceSeries` overrides them with binary searches over its sorted points.

use jiff::civil::Date;

use crate::date_math::{add_days, checked_add_days};
use crate::error::ParameterError;
use crate::model::PricePoint;

/// Source of daily closing prices, queried by calendar date
pub trait PriceSeriesProvider {
    /// Price on exactly `date`, if the market traded that day.
    fn get_price(&self, date: Date) -> Option<PricePoint>;

    /// First price on `date` or up to `max_days` days after it.
    fn price_at_or_after(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        (0..=i32::from(max_days))
            .map_while(|offset| checked_add_days(date, offset))
            .find_map(|day| self.get_price(day))
    }

    /// Last price on `date` or up to `max_days` days before it.
    fn price_at_or_before(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        (0..=i32::from(max_days))
            .map_while(|offset| checked_add_days(date, -offset))
            .find_map(|day| self.get_price(day))
    }

    /// All prices from `start` through `end` inclusive, in date order.
    fn prices_between(&self, start: Date, end: Date) -> Vec<PricePoint> {
        let mut points = Vec::new();
        let mut day = start;
        while day <= end {
            if let Some(p) = self.get_price(day) {
                points.push(p);
            }
            match checked_add_days(day, 1) {
                Some(next) => day = next,
                None => break,
            }
        }
        points
    }
}

impl<P: PriceSeriesProvider + ?Sized> PriceSeriesProvider for &P {
    fn get_price(&self, date: Date) -> Option<PricePoint> {
        (**self).get_price(date)
    }

    fn price_at_or_after(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        (**self).price_at_or_after(date, max_days)
    }

    fn price_at_or_before(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        (**self).price_at_or_before(date, max_days)
    }

    fn prices_between(&self, start: Date, end: Date) -> Vec<PricePoint> {
        (**self).prices_between(start, end)
    }
}

/// Immutable in-memory price history, sorted by date
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    name: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points in any order.
    ///
    /// Rejects duplicate dates and prices that are not finite and positive.
    pub fn new(
        name: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, ParameterError> {
        points.sort_by_key(|p| p.date);
        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(ParameterError::DuplicatePriceDate(pair[0].date));
            }
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !p.price.is_finite() || p.price <= 0.0)
        {
            return Err(ParameterError::InvalidPrice {
                date: bad.date,
                price: bad.price,
            });
        }
        Ok(Self {
            name: name.into(),
            points,
        })
    }

    /// Build a series by evaluating `price_fn` on every calendar day from
    /// `start` through `end`. Days where it returns `None` are skipped.
    pub fn from_fn(
        name: impl Into<String>,
        start: Date,
        end: Date,
        mut price_fn: impl FnMut(Date) -> Option<f64>,
    ) -> Result<Self, ParameterError> {
        let mut points = Vec::new();
        let mut day = start;
        while day <= end {
            if let Some(price) = price_fn(day) {
                points.push(PricePoint::new(day, price));
            }
            match checked_add_days(day, 1) {
                Some(next) => day = next,
                None => break,
            }
        }
        Self::new(name, points)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Index of the first point dated on or after `date`
    fn lower_bound(&self, date: Date) -> usize {
        self.points.partition_point(|p| p.date < date)
    }
}

impl PriceSeriesProvider for PriceSeries {
    fn get_price(&self, date: Date) -> Option<PricePoint> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i])
    }

    fn price_at_or_after(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        // Saturates at the calendar end
        let limit = add_days(date, i32::from(max_days));
        self.points
            .get(self.lower_bound(date))
            .filter(|p| p.date <= limit)
            .copied()
    }

    fn price_at_or_before(&self, date: Date, max_days: u16) -> Option<PricePoint> {
        let limit = add_days(date, -i32::from(max_days));
        let idx = self.points.partition_point(|p| p.date <= date);
        idx.checked_sub(1)
            .map(|i| self.points[i])
            .filter(|p| p.date >= limit)
    }

    fn prices_between(&self, start: Date, end: Date) -> Vec<PricePoint> {
        if end < start {
            return Vec::new();
        }
        let lo = self.lower_bound(start);
        let hi = self.points.partition_point(|p| p.date <= end);
        self.points[lo..hi].to_vec()
    }
}
