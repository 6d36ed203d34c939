mod period;
mod price;
mod results;
mod trial;

pub use period::{HoldingPeriod, SamplingWindow};
pub use price::PricePoint;
pub use results::{ResultsTable, SummaryStatistics, SweepReport};
pub use trial::{Omission, Trial, TrialResult};
