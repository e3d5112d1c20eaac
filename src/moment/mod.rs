//! Streaming central moments
//!
//! Four accumulators of increasing order. Each one contains the accumulator
//! one order below it and updates it first, reusing the deviation computed
//! there, so a [`FourthMoment`] also yields the count, mean, and the second
//! and third central moment sums.
//!
//! Results are raw sums of powered deviations, not normalized moments:
//! `SecondMoment::result()` is `Σ(x - mean)²`, not the variance.
//!
//! # Example
//!
//! ```
//! use storeless::moment::SecondMoment;
//! use storeless::traits::StorelessStatistic;
//!
//! let mut m2 = SecondMoment::new();
//! m2.increment_all(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
//!
//! assert_eq!(m2.n(), 8);
//! assert!((m2.mean() - 5.0).abs() < 1e-12);
//! assert!((m2.result() - 32.0).abs() < 1e-12);
//! ```
//!
//! # Sharing one accumulator
//!
//! A moment wrapped by [`share`] can back several statistics at once. The
//! statistics only read it; the caller increments the shared moment.
//!
//! ```
//! # #[cfg(feature = "statistics")]
//! # {
//! use storeless::moment::{share, SecondMoment};
//! use storeless::statistics::Variance;
//! use storeless::traits::StorelessStatistic;
//!
//! let moment = share(SecondMoment::new());
//! let sample = Variance::from_shared(moment.clone(), true);
//! let population = Variance::from_shared(moment.clone(), false);
//!
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     moment.borrow_mut().increment(v);
//! }
//!
//! assert!((sample.result() - 5.0 / 3.0).abs() < 1e-12);
//! assert!((population.result() - 1.25).abs() < 1e-12);
//! # }
//! ```

mod first;
mod fourth;
mod second;
mod third;

pub use first::FirstMoment;
pub use fourth::FourthMoment;
pub use second::SecondMoment;
pub use third::ThirdMoment;

use crate::traits::StorelessStatistic;
use core::cell::RefCell;

#[cfg(feature = "std")]
use std::rc::Rc;

#[cfg(not(feature = "std"))]
use alloc::rc::Rc;

/// A moment accumulator that several statistics can observe at once
pub type SharedMoment<M> = Rc<RefCell<M>>;

/// Wrap an accumulator so it can back several statistics
pub fn share<M>(moment: M) -> SharedMoment<M> {
    Rc::new(RefCell::new(moment))
}

/// Serde adapter for moment fields: NaN is written as `null` and `null`
/// reads back as NaN
#[cfg(feature = "serde")]
pub(crate) mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            None::<f64>.serialize(serializer)
        } else {
            Some(*value).serialize(serializer)
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// How a derived statistic holds its accumulator
///
/// `Owned` accumulators are updated by the statistic. `External` ones are
/// only read; `increment` and `clear` on the statistic leave them alone.
#[derive(Debug)]
pub(crate) enum Backing<M> {
    Owned(M),
    External(SharedMoment<M>),
}

impl<M: StorelessStatistic> Backing<M> {
    pub(crate) fn owns(&self) -> bool {
        matches!(self, Backing::Owned(_))
    }

    pub(crate) fn increment(&mut self, value: f64) {
        if let Backing::Owned(moment) = self {
            moment.increment(value);
        }
    }

    pub(crate) fn clear(&mut self) {
        if let Backing::Owned(moment) = self {
            moment.clear();
        }
    }

    /// Run `f` against the current accumulator state
    pub(crate) fn with<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        match self {
            Backing::Owned(moment) => f(moment),
            Backing::External(shared) => f(&shared.borrow()),
        }
    }

    pub(crate) fn n(&self) -> u64 {
        self.with(|m| m.n())
    }
}

// A copy never aliases the original, even when the original observes a
// shared accumulator.
impl<M: Clone> Clone for Backing<M> {
    fn clone(&self) -> Self {
        match self {
            Backing::Owned(moment) => Backing::Owned(moment.clone()),
            Backing::External(shared) => Backing::External(share(shared.borrow().clone())),
        }
    }
}

/// Pairwise combination terms shared by every order's `merge`
///
/// Computed from the two first-order states before either is modified.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MergeTerms {
    pub(crate) na: f64,
    pub(crate) nb: f64,
    pub(crate) delta: f64,
    pub(crate) delta_n: f64,
}

impl MergeTerms {
    pub(crate) fn new(a: &FirstMoment, b: &FirstMoment) -> Self {
        let na = a.n() as f64;
        let nb = b.n() as f64;
        let delta = b.mean() - a.mean();
        Self {
            na,
            nb,
            delta,
            delta_n: delta / (na + nb),
        }
    }
}
