//! Third central moment

use super::{FirstMoment, MergeTerms, SecondMoment};
use crate::traits::StorelessStatistic;

/// Running sum of cubed deviations from the mean
///
/// `result()` returns `Σ(x - mean)³`. Empty: NaN. One value: 0.
///
/// Update for the n-th value, with `prev_m2` read before the second-order
/// update runs:
///
/// ```text
/// m3 = m3 - 3·n_dev·prev_m2 + (n - 1)(n - 2)·n_dev²·dev
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThirdMoment {
    pub(crate) second: SecondMoment,
    /// Sum of cubed deviations (M3)
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) m3: f64,
    /// `n_dev²` for the latest value, reused by the fourth moment
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) n_dev_sq: f64,
}

impl Default for ThirdMoment {
    fn default() -> Self {
        Self::new()
    }
}

impl ThirdMoment {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            second: SecondMoment::new(),
            m3: f64::NAN,
            n_dev_sq: f64::NAN,
        }
    }

    /// Add one value
    pub fn increment(&mut self, value: f64) {
        // prev_m2 is read below, so it must not still be NaN
        if self.second.first.n < 1 {
            self.m3 = 0.0;
            self.second.m2 = 0.0;
            self.second.first.m1 = 0.0;
        }

        let prev_m2 = self.second.m2;
        self.second.increment(value);

        let first = &self.second.first;
        self.n_dev_sq = first.n_dev * first.n_dev;
        let n0 = first.n as f64;
        self.m3 = self.m3 - 3.0 * first.n_dev * prev_m2
            + (n0 - 1.0) * (n0 - 2.0) * self.n_dev_sq * first.dev;
    }

    /// Number of values seen
    pub fn n(&self) -> u64 {
        self.second.n()
    }

    /// Running mean, NaN when empty
    pub fn mean(&self) -> f64 {
        self.second.mean()
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.second.m2
    }

    /// Sum of cubed deviations from the mean
    pub fn m3(&self) -> f64 {
        self.m3
    }

    /// The embedded second-order accumulator
    pub fn second(&self) -> &SecondMoment {
        &self.second
    }

    pub(crate) fn first(&self) -> &FirstMoment {
        &self.second.first
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

        let t = MergeTerms::new(self.first(), other.first());
        let m2a = self.second.m2;
        let m2b = other.second.m2;
        self.second.merge(&other.second);

        self.m3 = self.m3
            + other.m3
            + t.delta * t.delta_n * t.delta_n * t.na * t.nb * (t.na - t.nb)
            + 3.0 * t.delta_n * (t.na * m2b - t.nb * m2a);
        self.n_dev_sq = f64::NAN;
    }
}

impl StorelessStatistic for ThirdMoment {
    fn increment(&mut self, value: f64) {
        ThirdMoment::increment(self, value);
    }

    fn result(&self) -> f64 {
        self.m3
    }

    fn n(&self) -> u64 {
        self.second.n()
    }

    fn clear(&mut self) {
        ThirdMoment::clear(self);
    }
}
