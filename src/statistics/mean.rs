//! Arithmetic mean

use super::validate::{sum, verify_values, verify_weighted, weighted_sum};
use crate::moment::{Backing, FirstMoment, SharedMoment};
use crate::traits::{
    StatsError, StorelessStatistic, UnivariateStatistic, WeightedUnivariateStatistic,
};

/// Arithmetic mean
///
/// Streaming updates go through a [`FirstMoment`]. Batch evaluation uses a
/// separate two-pass algorithm: the first pass computes `sum / n`, the second
/// sums the residuals about that estimate and adds back their mean, which
/// cancels most of the rounding error of the first pass. Batch evaluation
/// never touches the streaming state.
///
/// # Example
///
/// ```
/// use storeless::statistics::Mean;
/// use storeless::traits::{StorelessStatistic, UnivariateStatistic};
///
/// let data = [1.0, 2.0, 3.0, 4.0];
///
/// let mut mean = Mean::new();
/// mean.increment_all(&data);
/// assert_eq!(mean.result(), 2.5);
///
/// assert_eq!(Mean::new().evaluate(&data).unwrap(), 2.5);
/// ```
#[derive(Clone, Debug)]
pub struct Mean {
    moment: Backing<FirstMoment>,
}

impl Default for Mean {
    fn default() -> Self {
        Self::new()
    }
}

impl Mean {
    /// Create an empty mean owning its accumulator
    pub fn new() -> Self {
        Self::from_moment(FirstMoment::new())
    }

    /// Continue from an existing accumulator, taking ownership of it
    pub fn from_moment(moment: FirstMoment) -> Self {
        Self {
            moment: Backing::Owned(moment),
        }
    }

    /// Observe an accumulator owned elsewhere
    ///
    /// `increment` and `clear` on the returned mean do nothing; increment the
    /// shared accumulator instead.
    pub fn from_shared(moment: SharedMoment<FirstMoment>) -> Self {
        Self {
            moment: Backing::External(moment),
        }
    }

    /// Whether `increment` and `clear` update the accumulator
    pub fn owns_moment(&self) -> bool {
        self.moment.owns()
    }

    /// Two-pass mean of an already validated, non-empty window
    pub(crate) fn compute(values: &[f64]) -> f64 {
        let sample_size = values.len() as f64;
        let xbar = sum(values) / sample_size;
        let correction = values.iter().fold(0.0, |acc, &v| acc + (v - xbar));
        xbar + correction / sample_size
    }

    /// Two-pass weighted mean of an already validated, non-empty window
    pub(crate) fn compute_weighted(values: &[f64], weights: &[f64]) -> f64 {
        let sum_w = sum(weights);
        let xbar_w = weighted_sum(values, weights) / sum_w;
        let correction = values
            .iter()
            .zip(weights)
            .fold(0.0, |acc, (&v, &w)| acc + w * (v - xbar_w));
        xbar_w + correction / sum_w
    }
}

impl StorelessStatistic for Mean {
    fn increment(&mut self, value: f64) {
        self.moment.increment(value);
    }

    fn result(&self) -> f64 {
        self.moment.with(|m| m.mean())
    }

    fn n(&self) -> u64 {
        self.moment.n()
    }

    fn clear(&mut self) {
        self.moment.clear();
    }
}

impl UnivariateStatistic for Mean {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? {
            return Ok(f64::NAN);
        }
        Ok(Self::compute(&values[begin..begin + length]))
    }
}

impl WeightedUnivariateStatistic for Mean {
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
        Ok(Self::compute_weighted(&values[begin..end], &weights[begin..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::share;
    use approx::assert_relative_eq;

    #[test]
    fn test_streaming() {
        let mut mean = Mean::new();
        assert!(mean.result().is_nan());
        assert!(mean.is_empty());

        mean.increment_all(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean.n(), 8);
        assert_relative_eq!(mean.result(), 5.0, epsilon = 1e-12);

        mean.clear();
        assert!(mean.result().is_nan());
    }

    #[test]
    fn test_batch() {
        let mean = Mean::new();
        assert!(mean.evaluate(&[]).unwrap().is_nan());
        assert_eq!(mean.evaluate(&[3.5]).unwrap(), 3.5);
        assert_relative_eq!(mean.evaluate(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_relative_eq!(
            mean.evaluate_range(&[100.0, 1.0, 2.0, 3.0, -100.0], 1, 3)
                .unwrap(),
            2.0
        );
    }

    #[test]
    fn test_batch_does_not_touch_stream() {
        let mut mean = Mean::new();
        mean.increment(10.0);
        let _ = mean.evaluate(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mean.n(), 1);
        assert_eq!(mean.result(), 10.0);
    }

    #[test]
    fn test_window_errors() {
        let mean = Mean::new();
        assert_eq!(
            mean.evaluate_range(&[1.0, 2.0], 1, 2),
            Err(StatsError::WindowOutOfBounds {
                begin: 1,
                length: 2,
                len: 2
            })
        );
    }

    #[test]
    fn test_weighted() {
        let mean = Mean::new();
        let values = [1.0, 2.0, 3.0];

        assert_relative_eq!(
            mean.evaluate_weighted(&values, &[1.0, 1.0, 2.0]).unwrap(),
            2.25
        );
        assert_eq!(
            mean.evaluate_weighted(&values, &[1.0, 1.0, 1.0]).unwrap(),
            mean.evaluate(&values).unwrap()
        );
        assert!(mean.evaluate_weighted(&[], &[]).unwrap().is_nan());
        assert_eq!(
            mean.evaluate_weighted(&values, &[0.0, 0.0, 0.0]),
            Err(StatsError::NoPositiveWeight)
        );
    }

    #[test]
    fn test_correction_pass_recovers_rounding() {
        let values = [0.1; 10];

        let naive = values.iter().sum::<f64>() / values.len() as f64;
        assert_ne!(naive, 0.1);

        assert_eq!(Mean::new().evaluate(&values).unwrap(), 0.1);
    }

    #[test]
    fn test_shared_moment() {
        let shared = share(FirstMoment::new());
        let mut mean = Mean::from_shared(shared.clone());
        assert!(!mean.owns_moment());

        mean.increment(100.0);
        assert_eq!(mean.n(), 0);

        shared.borrow_mut().increment(1.0);
        shared.borrow_mut().increment(3.0);
        assert_eq!(mean.n(), 2);
        assert_eq!(mean.result(), 2.0);

        mean.clear();
        assert_eq!(shared.borrow().n(), 2);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut a = Mean::new();
        a.increment_all(&[1.0, 2.0, 3.0]);
        let b = a.clone();

        a.increment(10.0);
        assert_eq!(b.n(), 3);
        assert_eq!(b.result(), 2.0);
        assert_eq!(a.result(), 4.0);
    }
}
