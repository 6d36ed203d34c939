//! Start-date sampling across a window after the anchor date.

use jiff::civil::Date;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::date_math::add_days;
use crate::error::ParameterError;
use crate::model::SamplingWindow;

/// How start dates are spread across the sampling window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPolicy {
    /// Date `i` of `n` sits `floor(i * days / n)` days after the anchor
    #[default]
    Even,
    /// Distinct uniformly random day offsets, reproducible from the seed
    Random { seed: u64 },
}

/// Produces the start dates for a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DateSampler {
    pub policy: SamplingPolicy,
}

impl DateSampler {
    #[must_use]
    pub fn new(policy: SamplingPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn even() -> Self {
        Self::new(SamplingPolicy::Even)
    }

    #[must_use]
    pub fn random(seed: u64) -> Self {
        Self::new(SamplingPolicy::Random { seed })
    }

    /// `count` distinct ascending dates within `[anchor, anchor + window)`.
    ///
    /// Offsets are drawn from `[0, days)` where `days` is the window length,
    /// so the window end itself is never sampled.
    pub fn sample(
        &self,
        anchor: Date,
        count: usize,
        window: SamplingWindow,
    ) -> Result<Vec<Date>, ParameterError> {
        let days = validate(anchor, count, window)?;

        let offsets: Vec<usize> = match self.policy {
            SamplingPolicy::Even => (0..count).map(|i| i * days / count).collect(),
            SamplingPolicy::Random { seed } => {
                let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
                let mut picked = rand::seq::index::sample(&mut rng, days, count).into_vec();
                picked.sort_unstable();
                picked
            }
        };

        Ok(offsets
            .into_iter()
            .map(|offset| add_days(anchor, offset as i32))
            .collect())
    }
}

/// Check sampling inputs and return the window length in days.
pub(crate) fn validate(
    anchor: Date,
    count: usize,
    window: SamplingWindow,
) -> Result<usize, ParameterError> {
    if count == 0 {
        return Err(ParameterError::ZeroCount);
    }
    let days = window.days_from(anchor)?;
    if (days as usize) < count {
        return Err(ParameterError::WindowTooShort { days, count });
    }
    Ok(days as usize)
}
