//! Semivariance

use super::validate::verify_values;
use super::Mean;
use crate::traits::{StatsError, UnivariateStatistic};

/// Which side of the cutoff contributes to a [`SemiVariance`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Values above the cutoff
    Upside,
    /// Values below the cutoff
    #[default]
    Downside,
}

impl Direction {
    fn counts(self, dev: f64) -> bool {
        match self {
            Direction::Upside => dev > 0.0,
            Direction::Downside => dev < 0.0,
        }
    }
}

/// Settings for a [`SemiVariance`]
///
/// Plain value: build a new statistic to change them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SemiVarianceConfig {
    pub direction: Direction,
    /// Divide by `n - 1` instead of `n`
    pub bias_corrected: bool,
}

impl Default for SemiVarianceConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Downside,
            bias_corrected: true,
        }
    }
}

/// Semivariance about a cutoff
///
/// Sums the squared deviations on one side of the cutoff and divides by the
/// full window size (or size - 1). The cutoff defaults to the window mean.
///
/// # Example
///
/// ```
/// use storeless::statistics::{Direction, SemiVariance, SemiVarianceConfig};
///
/// let downside = SemiVariance::new();
/// let upside = SemiVariance::with_config(SemiVarianceConfig {
///     direction: Direction::Upside,
///     bias_corrected: false,
/// });
///
/// let data = [1.0, 2.0, 3.0, 4.0, 10.0];
/// assert!((downside.evaluate_with_cutoff(&data, 3.0, 0, 5).unwrap() - 1.25).abs() < 1e-12);
/// assert!((upside.evaluate_with_cutoff(&data, 3.0, 0, 5).unwrap() - 10.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SemiVariance {
    config: SemiVarianceConfig,
}

impl SemiVariance {
    /// Downside, bias-corrected semivariance
    pub fn new() -> Self {
        Self::default()
    }

    /// Semivariance with explicit settings
    pub fn with_config(config: SemiVarianceConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> SemiVarianceConfig {
        self.config
    }

    /// Semivariance of a window about a caller-supplied cutoff
    ///
    /// Empty window gives NaN, a single value gives 0.
    pub fn evaluate_with_cutoff(
        &self,
        values: &[f64],
        cutoff: f64,
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? {
            return Ok(f64::NAN);
        }
        Ok(self.compute(&values[begin..begin + length], cutoff))
    }

    fn compute(&self, values: &[f64], cutoff: f64) -> f64 {
        if values.len() == 1 {
            return 0.0;
        }

        let mut sumsq = 0.0;
        for &v in values {
            let dev = v - cutoff;
            if self.config.direction.counts(dev) {
                sumsq += dev * dev;
            }
        }

        let len = values.len() as f64;
        if self.config.bias_corrected {
            sumsq / (len - 1.0)
        } else {
            sumsq / len
        }
    }
}

impl UnivariateStatistic for SemiVariance {
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatsError> {
        if !verify_values(values, begin, length)? {
            return Ok(f64::NAN);
        }
        let window = &values[begin..begin + length];
        Ok(self.compute(window, Mean::compute(window)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Variance;
    use approx::assert_relative_eq;

    #[test]
    fn test_halves_sum_to_variance() {
        let data = [1.0, 5.0, 2.0, 8.0, 3.0, 9.0];
        for bias_corrected in [true, false] {
            let down = SemiVariance::with_config(SemiVarianceConfig {
                direction: Direction::Downside,
                bias_corrected,
            });
            let up = SemiVariance::with_config(SemiVarianceConfig {
                direction: Direction::Upside,
                bias_corrected,
            });
            let total = Variance::with_bias_correction(bias_corrected)
                .evaluate(&data)
                .unwrap();

            let halves = down.evaluate(&data).unwrap() + up.evaluate(&data).unwrap();
            assert_relative_eq!(halves, total, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_edge_cases() {
        let semi = SemiVariance::new();
        assert!(semi.evaluate(&[]).unwrap().is_nan());
        assert_eq!(semi.evaluate(&[3.0]).unwrap(), 0.0);
        assert!(semi.evaluate_with_cutoff(&[1.0, 2.0], 0.0, 1, 2).is_err());
    }

    #[test]
    fn test_window_is_respected() {
        let semi = SemiVariance::new();
        let values = [-100.0, 1.0, 2.0, 3.0, 100.0];
        // mean of [1, 2, 3] is 2, only 1 lies below
        assert_relative_eq!(semi.evaluate_range(&values, 1, 3).unwrap(), 0.5);
    }

    #[test]
    fn test_config_is_a_value() {
        let semi = SemiVariance::new();
        assert_eq!(semi.config(), SemiVarianceConfig::default());
        assert_eq!(semi.config().direction, Direction::Downside);
        assert!(semi.config().bias_corrected);
    }
}
