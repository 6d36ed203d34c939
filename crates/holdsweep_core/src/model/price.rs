use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Closing price of the instrument on one trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub price: f64,
}

impl PricePoint {
    #[must_use]
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}
