//! Standard deviation

use super::Variance;
use crate::math;
use crate::moment::{SecondMoment, SharedMoment};
use crate::traits::{
    StatsError, StorelessStatistic, UnivariateStatistic, WeightedUnivariateStatistic,
};

/// Square root of [`Variance`]
///
/// Every result is `sqrt` of the matching variance result, so the empty case
/// stays NaN and a single value gives 0.
///
/// # Example
///
/// ```
/// use storeless::statistics::StandardDeviation;
/// use storeless::traits::UnivariateStatistic;
///
/// let sd = StandardDeviation::population();
/// let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((sd.evaluate(&data).unwrap() - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StandardDeviation {
    variance: Variance,
}

impl StandardDeviation {
    /// Create an empty bias-corrected (sample) standard deviation
    pub fn new() -> Self {
        Self {
            variance: Variance::new(),
        }
    }

    /// Create an empty population standard deviation
    pub fn population() -> Self {
        Self {
            variance: Variance::population(),
        }
    }

    /// Create an empty standard deviation with the given divisor convention
    pub fn with_bias_correction(bias_corrected: bool) -> Self {
        Self {
            variance: Variance::with_bias_correction(bias_corrected),
        }
    }

    /// Continue from an existing accumulator, taking ownership of it
    pub fn from_moment(moment: SecondMoment, bias_corrected: bool) -> Self {
        Self {
            variance: Variance::from_moment(moment, bias_corrected),
        }
    }

    /// Observe an accumulator owned elsewhere
    ///
    /// `increment` and `clear` do nothing on the returned statistic.
    pub fn from_shared(moment: SharedMoment<SecondMoment>, bias_corrected: bool) -> Self {
        Self {
            variance: Variance::from_shared(moment, bias_corrected),
        }
    }

    /// Whether `increment` and `clear` update the accumulator
    pub fn owns_moment(&self) -> bool {
        self.variance.owns_moment()
    }

    /// Whether the underlying variance divides by `n - 1`
    pub fn is_bias_corrected(&self) -> bool {
        self.variance.is_bias_corrected()
    }

    /// Switch between `n - 1` and `n` divisors
    pub fn set_bias_corrected(&mut self, bias_corrected: bool) {
        self.variance.set_bias_corrected(bias_corrected);
    }

    /// Standard deviation of a window about a caller-supplied mean
    pub fn evaluate_with_mean(
        &self,
        values: &[f64],
        mean: f64,
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        self.variance
            .evaluate_with_mean(values, mean, begin, length)
            .map(math::sqrt)
    }

    /// Weighted standard deviation of a window about a caller-supplied mean
    pub fn evaluate_weighted_with_mean(
        &self,
        values: &[f64],
        weights: &[f64],
        mean: f64,
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        self.variance
            .evaluate_weighted_with_mean(values, weights, mean, begin, length)
            .map(math::sqrt)
    }
}

impl StorelessStatistic for StandardDeviation {
    fn increment(&mut self, value: f64) {
        self.variance.increment(value);
    }

    fn result(&self) -> f64 {
        math::sqrt(self.variance.result())
    }

    fn n(&self) -> u64 {
        self.variance.n()
    }

    fn clear(&mut self) {
        self.variance.clear();
    }
}

impl UnivariateStatistic for StandardDeviation {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        self.variance
            .evaluate_range(values, begin, length)
            .map(math::sqrt)
    }
}

impl WeightedUnivariateStatistic for StandardDeviation {
    fn evaluate_weighted_range(
        &self,
        values: &[f64],
        weights: &[f64],
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        self.variance
            .evaluate_weighted_range(values, weights, begin, length)
            .map(math::sqrt)
    }
}
