//! Sample excess kurtosis

use super::validate::verify_values;
use super::{Mean, Variance, NEAR_ZERO_VARIANCE};
use crate::math;
use crate::moment::{Backing, FourthMoment, SharedMoment};
use crate::traits::{StatsError, StorelessStatistic, UnivariateStatistic};

/// Bias-corrected sample excess kurtosis
///
/// ```text
/// kurtosis = (n(n + 1)·m4 - 3·m2²·(n - 1)) / ((n - 1)(n - 2)(n - 3)·s⁴)
/// ```
///
/// Fewer than four values give NaN. Data with (near) zero variance gives 0.
#[derive(Clone, Debug)]
pub struct Kurtosis {
    moment: Backing<FourthMoment>,
}

impl Default for Kurtosis {
    fn default() -> Self {
        Self::new()
    }
}

impl Kurtosis {
    /// Create an empty kurtosis owning its accumulator
    pub fn new() -> Self {
        Self::from_moment(FourthMoment::new())
    }

    /// Continue from an existing accumulator, taking ownership of it
    pub fn from_moment(moment: FourthMoment) -> Self {
        Self {
            moment: Backing::Owned(moment),
        }
    }

    /// Observe an accumulator owned elsewhere
    pub fn from_shared(moment: SharedMoment<FourthMoment>) -> Self {
        Self {
            moment: Backing::External(moment),
        }
    }

    /// Whether `increment` and `clear` update the accumulator
    pub fn owns_moment(&self) -> bool {
        self.moment.owns()
    }
}

impl StorelessStatistic for Kurtosis {
    fn increment(&mut self, value: f64) {
        self.moment.increment(value);
    }

    fn result(&self) -> f64 {
        self.moment.with(|m| {
            if m.n() <= 3 {
                return f64::NAN;
            }
            let n0 = m.n() as f64;
            let variance = m.m2() / (n0 - 1.0);
            if variance < NEAR_ZERO_VARIANCE {
                return 0.0;
            }
            (n0 * (n0 + 1.0) * m.m4() - 3.0 * m.m2() * m.m2() * (n0 - 1.0))
                / ((n0 - 1.0) * (n0 - 2.0) * (n0 - 3.0) * variance * variance)
        })
    }

    fn n(&self) -> u64 {
        self.moment.n()
    }

    fn clear(&mut self) {
        self.moment.clear();
    }
}

impl UnivariateStatistic for Kurtosis {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? || length <= 3 {
            return Ok(f64::NAN);
        }
        let window = &values[begin..begin + length];
        let mean = Mean::compute(window);
        let variance = Variance::new().evaluate_with_mean(window, mean, 0, length)?;
        if variance < NEAR_ZERO_VARIANCE {
            return Ok(0.0);
        }
        let std_dev = math::sqrt(variance);

        let mut accum3 = 0.0;
        for &v in window {
            accum3 += math::powi(v - mean, 4);
        }
        accum3 /= math::powi(std_dev, 4);

        let n0 = length as f64;
        let coefficient_one = (n0 * (n0 + 1.0)) / ((n0 - 1.0) * (n0 - 2.0) * (n0 - 3.0));
        let term_two = (3.0 * math::powi(n0 - 1.0, 2)) / ((n0 - 2.0) * (n0 - 3.0));
        Ok(coefficient_one * accum3 - term_two)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DATA: [f64; 10] = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 15.0];

    #[test]
    fn test_too_few_values() {
        let mut kurt = Kurtosis::new();
        kurt.increment_all(&[1.0, 2.0, 3.0]);
        assert!(kurt.result().is_nan());
        assert!(kurt.evaluate(&[1.0, 2.0, 3.0]).unwrap().is_nan());
    }

    #[test]
    fn test_constant_is_zero() {
        let mut kurt = Kurtosis::new();
        kurt.increment_all(&[2.5; 6]);
        assert_eq!(kurt.result(), 0.0);
        assert_eq!(kurt.evaluate(&[2.5; 6]).unwrap(), 0.0);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let mut kurt = Kurtosis::new();
        kurt.increment_all(&DATA);
        let batch = kurt.evaluate(&DATA).unwrap();

        assert!(batch > 0.0, "one outlier should give a heavy tail");
        assert_relative_eq!(kurt.result(), batch, epsilon = 1e-9);
    }

    #[test]
    fn test_shift_invariant() {
        let shifted: Vec<f64> = DATA.iter().map(|v| v + 1000.0).collect();
        let kurt = Kurtosis::new();
        assert_relative_eq!(
            kurt.evaluate(&shifted).unwrap(),
            kurt.evaluate(&DATA).unwrap(),
            epsilon = 1e-8
        );
    }
}
