//! Second central moment

use super::{FirstMoment, MergeTerms};
use crate::traits::StorelessStatistic;

/// Running sum of squared deviations from the mean
///
/// `result()` returns `Σ(x - mean)²`. Divide by `n` or `n - 1` for a
/// variance, or use [`Variance`](crate::statistics::Variance) which does it
/// for you.
///
/// Empty: NaN. One value: 0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondMoment {
    pub(crate) first: FirstMoment,
    /// Sum of squared deviations (M2)
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) m2: f64,
}

impl Default for SecondMoment {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondMoment {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            first: FirstMoment::new(),
            m2: f64::NAN,
        }
    }

    /// Add one value
    pub fn increment(&mut self, value: f64) {
        if self.first.n < 1 {
            self.first.m1 = 0.0;
            self.m2 = 0.0;
        }
        self.first.increment(value);
        self.m2 += (self.first.n as f64 - 1.0) * self.first.dev * self.first.n_dev;
    }

    /// Number of values seen
    pub fn n(&self) -> u64 {
        self.first.n
    }

    /// Running mean, NaN when empty
    pub fn mean(&self) -> f64 {
        self.first.m1
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// The embedded first-order accumulator
    pub fn first(&self) -> &FirstMoment {
        &self.first
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Fold another accumulator's observations into this one
    pub fn merge(&mut self, other: &Self) {
        if other.n() == 0 {
            return;
        }
        if self.n() == 0 {
            *self = other.clone();
            return;
        }

        let t = MergeTerms::new(&self.first, &other.first);
        self.first.merge(&other.first);
        self.m2 = self.m2 + other.m2 + t.delta * t.delta_n * t.na * t.nb;
    }
}

impl StorelessStatistic for SecondMoment {
    fn increment(&mut self, value: f64) {
        SecondMoment::increment(self, value);
    }

    fn result(&self) -> f64 {
        self.m2
    }

    fn n(&self) -> u64 {
        self.first.n
    }

    fn clear(&mut self) {
        SecondMoment::clear(self);
    }
}
