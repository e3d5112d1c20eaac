//! Variance

use super::validate::{sum, verify_values, verify_weighted};
use super::Mean;
use crate::moment::{Backing, SecondMoment, SharedMoment};
use crate::traits::{
    StatsError, StorelessStatistic, UnivariateStatistic, WeightedUnivariateStatistic,
};

/// Sample or population variance
///
/// Bias-corrected (the default) divides by `n - 1`; population variance
/// divides by `n`. The flag applies to both the streaming and batch paths.
///
/// Streaming: `m2 / (n - 1)` or `m2 / n` from a [`SecondMoment`]. Empty gives
/// NaN and a single value gives 0.
///
/// Batch: the mean is computed with [`Mean`]'s two-pass algorithm, then one
/// more pass accumulates `Σdev²` and `Σdev` and returns
/// `(Σdev² - (Σdev)² / n) / divisor`. The `Σdev` term cancels the first-order
/// error left in the mean.
///
/// # Example
///
/// ```
/// use storeless::statistics::Variance;
/// use storeless::traits::{StorelessStatistic, UnivariateStatistic};
///
/// let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
///
/// let population = Variance::population();
/// assert!((population.evaluate(&data).unwrap() - 4.0).abs() < 1e-12);
///
/// let mut sample = Variance::new();
/// sample.increment_all(&data);
/// assert!((sample.result() - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Variance {
    moment: Backing<SecondMoment>,
    bias_corrected: bool,
}

impl Default for Variance {
    fn default() -> Self {
        Self::new()
    }
}

impl Variance {
    /// Create an empty bias-corrected (sample) variance
    pub fn new() -> Self {
        Self::with_bias_correction(true)
    }

    /// Create an empty population variance
    pub fn population() -> Self {
        Self::with_bias_correction(false)
    }

    /// Create an empty variance with the given divisor convention
    pub fn with_bias_correction(bias_corrected: bool) -> Self {
        Self {
            moment: Backing::Owned(SecondMoment::new()),
            bias_corrected,
        }
    }

    /// Continue from an existing accumulator, taking ownership of it
    pub fn from_moment(moment: SecondMoment, bias_corrected: bool) -> Self {
        Self {
            moment: Backing::Owned(moment),
            bias_corrected,
        }
    }

    /// Observe an accumulator owned elsewhere
    ///
    /// `increment` and `clear` on the returned variance do nothing. Several
    /// variances (or standard deviations) can read the same accumulator with
    /// different bias settings.
    pub fn from_shared(moment: SharedMoment<SecondMoment>, bias_corrected: bool) -> Self {
        Self {
            moment: Backing::External(moment),
            bias_corrected,
        }
    }

    /// Whether `increment` and `clear` update the accumulator
    pub fn owns_moment(&self) -> bool {
        self.moment.owns()
    }

    /// Whether the divisor is `n - 1`
    pub fn is_bias_corrected(&self) -> bool {
        self.bias_corrected
    }

    /// Switch between `n - 1` and `n` divisors
    pub fn set_bias_corrected(&mut self, bias_corrected: bool) {
        self.bias_corrected = bias_corrected;
    }

    /// Variance of a window about a caller-supplied mean
    ///
    /// Empty window gives NaN, a single value gives 0.
    pub fn evaluate_with_mean(
        &self,
        values: &[f64],
        mean: f64,
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? {
            return Ok(f64::NAN);
        }
        Ok(self.compute(&values[begin..begin + length], mean))
    }

    /// Weighted variance of a window about a caller-supplied mean
    ///
    /// The weight total replaces `n` in the divisor.
    pub fn evaluate_weighted_with_mean(
        &self,
        values: &[f64],
        weights: &[f64],
        mean: f64,
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        if !verify_weighted(values, weights, begin, length)? {
            return Ok(f64::NAN);
        }
        let end = begin + length;
        Ok(self.compute_weighted(&values[begin..end], &weights[begin..end], mean))
    }

    fn compute(&self, values: &[f64], mean: f64) -> f64 {
        if values.len() == 1 {
            return 0.0;
        }

        let mut accum = 0.0;
        let mut accum2 = 0.0;
        for &v in values {
            let dev = v - mean;
            accum += dev * dev;
            accum2 += dev;
        }

        let len = values.len() as f64;
        let divisor = if self.bias_corrected { len - 1.0 } else { len };
        (accum - (accum2 * accum2 / len)) / divisor
    }

    fn compute_weighted(&self, values: &[f64], weights: &[f64], mean: f64) -> f64 {
        if values.len() == 1 {
            return 0.0;
        }

        let mut accum = 0.0;
        let mut accum2 = 0.0;
        for (&v, &w) in values.iter().zip(weights) {
            let dev = v - mean;
            accum += w * (dev * dev);
            accum2 += w * dev;
        }

        let sum_wts = sum(weights);
        let divisor = if self.bias_corrected {
            sum_wts - 1.0
        } else {
            sum_wts
        };
        (accum - (accum2 * accum2 / sum_wts)) / divisor
    }
}

impl StorelessStatistic for Variance {
    fn increment(&mut self, value: f64) {
        self.moment.increment(value);
    }

    fn result(&self) -> f64 {
        let bias_corrected = self.bias_corrected;
        self.moment.with(|m| match m.n() {
            0 => f64::NAN,
            1 => 0.0,
            n if bias_corrected => m.m2() / (n as f64 - 1.0),
            n => m.m2() / n as f64,
        })
    }

    fn n(&self) -> u64 {
        self.moment.n()
    }

    fn clear(&mut self) {
        self.moment.clear();
    }
}

impl UnivariateStatistic for Variance {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? {
            return Ok(f64::NAN);
        }
        let window = &values[begin..begin + length];
        if window.len() == 1 {
            return Ok(0.0);
        }
        Ok(self.compute(window, Mean::compute(window)))
    }
}

impl WeightedUnivariateStatistic for Variance {
    fn evaluate_weighted_range(
        &self,
        values: &[f64],
        weights: &[f64],
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        if !verify_weighted(values, weights, begin, length)? {
            return Ok(f64::NAN);
        }
        let end = begin + length;
        let (values, weights) = (&values[begin..end], &weights[begin..end]);
        if values.len() == 1 {
            return Ok(0.0);
        }
        let mean = Mean::compute_weighted(values, weights);
        Ok(self.compute_weighted(values, weights, mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::share;
    use approx::assert_relative_eq;

    const DATA: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_streaming_conventions() {
        let mut var = Variance::new();
        assert!(var.result().is_nan());

        var.increment(3.0);
        assert_eq!(var.result(), 0.0);

        var.increment_all(&DATA);
        assert_eq!(var.n(), 9);
        assert!(var.result() > 0.0);
    }

    #[test]
    fn test_streaming_matches_batch() {
        for bias in [true, false] {
            let mut var = Variance::with_bias_correction(bias);
            var.increment_all(&DATA);
            let batch = var.evaluate(&DATA).unwrap();
            assert_relative_eq!(var.result(), batch, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_batch_values() {
        assert_relative_eq!(Variance::population().evaluate(&DATA).unwrap(), 4.0);
        assert_relative_eq!(
            Variance::new().evaluate(&DATA).unwrap(),
            32.0 / 7.0,
            epsilon = 1e-12
        );
        assert!(Variance::new().evaluate(&[]).unwrap().is_nan());
        assert_eq!(Variance::new().evaluate(&[8.0]).unwrap(), 0.0);
        assert_eq!(Variance::population().evaluate(&[8.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_supplied_mean() {
        let var = Variance::population();
        let exact = var.evaluate_with_mean(&DATA, 5.0, 0, DATA.len()).unwrap();
        assert_relative_eq!(exact, 4.0);

        // the Σdev term compensates for an off-centre mean
        let shifted = var.evaluate_with_mean(&DATA, 5.5, 0, DATA.len()).unwrap();
        assert_relative_eq!(shifted, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bias_toggle() {
        let mut var = Variance::new();
        var.increment_all(&DATA);
        let sample = var.result();

        var.set_bias_corrected(false);
        assert!(!var.is_bias_corrected());
        assert_relative_eq!(var.result() * 8.0 / 7.0, sample, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted() {
        let ones = [1.0; 8];
        for bias in [true, false] {
            let var = Variance::with_bias_correction(bias);
            assert_eq!(
                var.evaluate_weighted(&DATA, &ones).unwrap(),
                var.evaluate(&DATA).unwrap()
            );
        }

        let var = Variance::population();
        // weight 2 on a value is the same as listing it twice
        let weighted = var
            .evaluate_weighted(&[1.0, 2.0, 4.0], &[2.0, 1.0, 1.0])
            .unwrap();
        let repeated = var.evaluate(&[1.0, 1.0, 2.0, 4.0]).unwrap();
        assert_relative_eq!(weighted, repeated, epsilon = 1e-12);

        assert_eq!(
            var.evaluate_weighted(&[1.0, 2.0], &[1.0, -0.5]),
            Err(StatsError::NegativeWeight {
                index: 1,
                weight: -0.5
            })
        );
        assert_eq!(var.evaluate_weighted(&[5.0], &[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_shared_views() {
        let moment = share(SecondMoment::new());
        let mut sample = Variance::from_shared(moment.clone(), true);
        let population = Variance::from_shared(moment.clone(), false);

        sample.increment(1000.0);
        assert_eq!(sample.n(), 0);

        for v in [1.0, 2.0, 3.0, 4.0] {
            moment.borrow_mut().increment(v);
        }
        assert_relative_eq!(sample.result(), 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(population.result(), 1.25, epsilon = 1e-12);

        sample.clear();
        assert_eq!(population.n(), 4);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut a = Variance::new();
        a.increment_all(&[1.0, 2.0, 3.0]);
        let b = a.clone();

        a.increment(50.0);
        assert_eq!(b.n(), 3);
        assert_eq!(b.result(), 1.0);
        assert!(b.is_bias_corrected());
    }
}
