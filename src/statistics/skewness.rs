//! Sample skewness

use super::validate::verify_values;
use super::{Mean, NEAR_ZERO_VARIANCE};
use crate::math;
use crate::moment::{Backing, SharedMoment, ThirdMoment};
use crate::traits::{StatsError, StorelessStatistic, UnivariateStatistic};

/// Bias-corrected sample skewness
///
/// ```text
/// skewness = n·m3 / ((n - 1)(n - 2)·s³)
/// ```
///
/// where `s²` is the sample variance. Fewer than three values give NaN.
/// Data with (near) zero variance gives 0.
#[derive(Clone, Debug)]
pub struct Skewness {
    moment: Backing<ThirdMoment>,
}

impl Default for Skewness {
    fn default() -> Self {
        Self::new()
    }
}

impl Skewness {
    /// Create an empty skewness owning its accumulator
    pub fn new() -> Self {
        Self::from_moment(ThirdMoment::new())
    }

    /// Continue from an existing accumulator, taking ownership of it
    pub fn from_moment(moment: ThirdMoment) -> Self {
        Self {
            moment: Backing::Owned(moment),
        }
    }

    /// Observe an accumulator owned elsewhere
    pub fn from_shared(moment: SharedMoment<ThirdMoment>) -> Self {
        Self {
            moment: Backing::External(moment),
        }
    }

    /// Whether `increment` and `clear` update the accumulator
    pub fn owns_moment(&self) -> bool {
        self.moment.owns()
    }
}

impl StorelessStatistic for Skewness {
    fn increment(&mut self, value: f64) {
        self.moment.increment(value);
    }

    fn result(&self) -> f64 {
        self.moment.with(|m| {
            if m.n() < 3 {
                return f64::NAN;
            }
            let n0 = m.n() as f64;
            let variance = m.m2() / (n0 - 1.0);
            if variance < NEAR_ZERO_VARIANCE {
                0.0
            } else {
                (n0 * m.m3()) / ((n0 - 1.0) * (n0 - 2.0) * math::sqrt(variance) * variance)
            }
        })
    }

    fn n(&self) -> u64 {
        self.moment.n()
    }

    fn clear(&mut self) {
        self.moment.clear();
    }
}

impl UnivariateStatistic for Skewness {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? || length < 3 {
            return Ok(f64::NAN);
        }
        let window = &values[begin..begin + length];
        let mean = Mean::compute(window);

        let mut accum = 0.0;
        let mut accum2 = 0.0;
        for &v in window {
            let d = v - mean;
            accum += d * d;
            accum2 += d;
        }
        let n0 = length as f64;
        let variance = (accum - (accum2 * accum2 / n0)) / (n0 - 1.0);
        if variance < NEAR_ZERO_VARIANCE {
            return Ok(0.0);
        }

        let mut accum3 = 0.0;
        for &v in window {
            let d = v - mean;
            accum3 += d * d * d;
        }
        accum3 /= variance * math::sqrt(variance);

        Ok((n0 / ((n0 - 1.0) * (n0 - 2.0))) * accum3)
    }
}
