//! Fourth central moment

use super::{MergeTerms, ThirdMoment};
use crate::traits::StorelessStatistic;

/// Running sum of fourth-power deviations from the mean
///
/// `result()` returns `Σ(x - mean)⁴`. Empty: NaN. One value: 0.
///
/// Update for the n-th value, with `prev_m2` and `prev_m3` read before the
/// third-order update runs:
///
/// ```text
/// m4 = m4 - 4·n_dev·prev_m3 + 6·n_dev²·prev_m2
///         + (n² - 3(n - 1))·n_dev⁴·(n - 1)·n
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourthMoment {
    pub(crate) third: ThirdMoment,
    /// Sum of fourth-power deviations (M4)
    #[cfg_attr(feature = "serde", serde(with = "crate::moment::nan_as_null"))]
    pub(crate) m4: f64,
}

impl Default for FourthMoment {
    fn default() -> Self {
        Self::new()
    }
}

impl FourthMoment {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            third: ThirdMoment::new(),
            m4: f64::NAN,
        }
    }

    /// Add one value
    pub fn increment(&mut self, value: f64) {
        if self.third.n() < 1 {
            self.m4 = 0.0;
            self.third.m3 = 0.0;
            self.third.second.m2 = 0.0;
            self.third.second.first.m1 = 0.0;
        }

        let prev_m3 = self.third.m3;
        let prev_m2 = self.third.second.m2;
        self.third.increment(value);

        let n0 = self.third.n() as f64;
        let n_dev = self.third.first().n_dev;
        let n_dev_sq = self.third.n_dev_sq;
        self.m4 = self.m4 - 4.0 * n_dev * prev_m3
            + 6.0 * n_dev_sq * prev_m2
            + ((n0 * n0) - 3.0 * (n0 - 1.0)) * (n_dev_sq * n_dev_sq * (n0 - 1.0) * n0);
    }

    /// Number of values seen
    pub fn n(&self) -> u64 {
        self.third.n()
    }

    /// Running mean, NaN when empty
    pub fn mean(&self) -> f64 {
        self.third.mean()
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.third.m2()
    }

    /// Sum of cubed deviations from the mean
    pub fn m3(&self) -> f64 {
        self.third.m3
    }

    /// Sum of fourth-power deviations from the mean
    pub fn m4(&self) -> f64 {
        self.m4
    }

    /// The embedded third-order accumulator
    pub fn third(&self) -> &ThirdMoment {
        &self.third
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

        let t = MergeTerms::new(self.third.first(), other.third.first());
        let (m2a, m3a) = (self.m2(), self.m3());
        let (m2b, m3b) = (other.m2(), other.m3());
        self.third.merge(&other.third);

        let delta_n_sq = t.delta_n * t.delta_n;
        self.m4 = self.m4
            + other.m4
            + t.delta * delta_n_sq * t.delta_n * t.na * t.nb
                * (t.na * t.na - t.na * t.nb + t.nb * t.nb)
            + 6.0 * delta_n_sq * (t.na * t.na * m2b + t.nb * t.nb * m2a)
            + 4.0 * t.delta_n * (t.na * m3b - t.nb * m3a);
    }
}

impl StorelessStatistic for FourthMoment {
    fn increment(&mut self, value: f64) {
        FourthMoment::increment(self, value);
    }

    fn result(&self) -> f64 {
        self.m4
    }

    fn n(&self) -> u64 {
        self.third.n()
    }

    fn clear(&mut self) {
        FourthMoment::clear(self);
    }
}
