//! First moment (running mean)

use super::MergeTerms;
use crate::traits::StorelessStatistic;

/// Running count and arithmetic mean
///
/// Updated with the online recurrence `m1 += (x - m1) / n`, which stays
/// accurate for long streams and large magnitudes where `sum / n` loses
/// precision.
///
/// The deviation of the newest value from the previous mean and that
/// deviation divided by the new count are kept as state: higher-order
/// moments read them right after delegating an update here.
///
/// # Example
///
/// ```
/// use storeless::moment::FirstMoment;
/// use storeless::traits::StorelessStatistic;
///
/// let mut m1 = FirstMoment::new();
/// assert!(m1.result().is_nan());
///
/// m1.increment_all(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(m1.n(), 4);
/// assert_eq!(m1.mean(), 2.5);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstMoment {
    /// Number of values seen
    pub(crate) n: u64,
    /// Running mean
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) m1: f64,
    /// Deviation of the latest value from the previous mean
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) dev: f64,
    /// `dev / n` for the latest value
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) n_dev: f64,
}

impl Default for FirstMoment {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstMoment {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            n: 0,
            m1: f64::NAN,
            dev: f64::NAN,
            n_dev: f64::NAN,
        }
    }

    /// Add one value
    pub fn increment(&mut self, value: f64) {
        if self.n == 0 {
            self.m1 = 0.0;
        }
        self.n += 1;
        let n0 = self.n as f64;
        self.dev = value - self.m1;
        self.n_dev = self.dev / n0;
        self.m1 += self.n_dev;
    }

    /// Number of values seen
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Running mean, NaN when empty
    pub fn mean(&self) -> f64 {
        self.m1
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Fold another accumulator's observations into this one
    pub fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = other.clone();
            return;
        }

        let terms = MergeTerms::new(self, other);
        self.n += other.n;
        self.m1 += terms.nb * terms.delta_n;
        // scratch only describes a single increment
        self.dev = f64::NAN;
        self.n_dev = f64::NAN;
    }
}

impl StorelessStatistic for FirstMoment {
    fn increment(&mut self, value: f64) {
        FirstMoment::increment(self, value);
    }

    fn result(&self) -> f64 {
        self.m1
    }

    fn n(&self) -> u64 {
        self.n
    }

    fn clear(&mut self) {
        FirstMoment::clear(self);
    }
}
