//! Core traits for streaming and batch statistics
//!
//! Every accumulator implements [`StorelessStatistic`]. Statistics that can
//! also be computed over a stored array implement [`UnivariateStatistic`]
//! and, where weights make sense, [`WeightedUnivariateStatistic`].

use core::fmt::Debug;

/// Error raised by batch evaluation when the caller's input is invalid
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// `begin + length` runs past the end of the values array
    WindowOutOfBounds {
        begin: usize,
        length: usize,
        len: usize,
    },
    /// Values and weights arrays differ in length
    LengthMismatch { values: usize, weights: usize },
    /// A weight inside the window is NaN
    NotANumberWeight { index: usize },
    /// A weight inside the window is infinite
    InfiniteWeight { index: usize, weight: f64 },
    /// A weight inside the window is negative
    NegativeWeight { index: usize, weight: f64 },
    /// Every weight inside the window is zero
    NoPositiveWeight,
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::WindowOutOfBounds { begin, length, len } => write!(
                f,
                "window out of bounds: begin {} + length {} exceeds array length {}",
                begin, length, len
            ),
            StatsError::LengthMismatch { values, weights } => write!(
                f,
                "length mismatch: {} values but {} weights",
                values, weights
            ),
            StatsError::NotANumberWeight { index } => {
                write!(f, "weight at index {} is NaN", index)
            }
            StatsError::InfiniteWeight { index, weight } => {
                write!(f, "weight at index {} is not finite: {}", index, weight)
            }
            StatsError::NegativeWeight { index, weight } => {
                write!(f, "weight at index {} is negative: {}", index, weight)
            }
            StatsError::NoPositiveWeight => write!(f, "at least one weight must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// Error raised by [`ResizableDoubleArray`](crate::array::ResizableDoubleArray)
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// Index is not inside the logical window
    IndexOutOfBounds { index: usize, len: usize },
    /// Asked to discard more elements than the array holds
    DiscardTooMany { requested: usize, available: usize },
    /// Operation needs at least one element
    Empty,
    /// Initial capacity must be positive
    InvalidCapacity(usize),
    /// Requested length does not fit in addressable storage
    LengthTooLarge(usize),
    /// Expansion factor must be greater than one
    InvalidExpansionFactor(f64),
    /// Contraction criterion must be greater than one
    InvalidContractionCriterion(f64),
    /// Contraction criterion must exceed the expansion factor
    ContractionBelowExpansion { contraction: f64, expansion: f64 },
}

impl core::fmt::Display for ArrayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArrayError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            ArrayError::DiscardTooMany {
                requested,
                available,
            } => write!(
                f,
                "cannot discard {} elements, only {} available",
                requested, available
            ),
            ArrayError::Empty => write!(f, "array is empty"),
            ArrayError::InvalidCapacity(c) => {
                write!(f, "initial capacity must be positive, got {}", c)
            }
            ArrayError::LengthTooLarge(len) => {
                write!(f, "length {} exceeds the maximum storage length", len)
            }
            ArrayError::InvalidExpansionFactor(e) => {
                write!(f, "expansion factor must be greater than 1, got {}", e)
            }
            ArrayError::InvalidContractionCriterion(c) => {
                write!(f, "contraction criterion must be greater than 1, got {}", c)
            }
            ArrayError::ContractionBelowExpansion {
                contraction,
                expansion,
            } => write!(
                f,
                "contraction criterion {} must exceed expansion factor {}",
                contraction, expansion
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArrayError {}

/// A statistic updated one observation at a time without storing the data
///
/// Implementations are not synchronized. Callers sharing one across threads
/// must serialize `increment` and `clear` themselves.
pub trait StorelessStatistic: Clone + Debug {
    /// Consume one observation
    ///
    /// Never fails. NaN and infinite values propagate through the result.
    fn increment(&mut self, value: f64);

    /// Consume every value in order
    fn increment_all(&mut self, values: &[f64]) {
        for &value in values {
            self.increment(value);
        }
    }

    /// Current value of the statistic, NaN when nothing has been seen
    fn result(&self) -> f64;

    /// Number of observations consumed
    fn n(&self) -> u64;

    /// Reset to the empty state
    fn clear(&mut self);

    /// Check if no observation has been consumed
    fn is_empty(&self) -> bool {
        self.n() == 0
    }
}

/// A statistic computed over a stored array
pub trait UnivariateStatistic {
    /// Evaluate over `values[begin..begin + length]`
    ///
    /// Returns NaN for an empty window.
    fn evaluate_range(&self, values: &[f64], begin: usize, length: usize)
        -> Result<f64, StatsError>;

    /// Evaluate over the whole array
    fn evaluate(&self, values: &[f64]) -> Result<f64, StatsError> {
        self.evaluate_range(values, 0, values.len())
    }
}

/// A statistic computed over a stored array with per-value weights
pub trait WeightedUnivariateStatistic {
    /// Evaluate over `values[begin..begin + length]` with matching weights
    ///
    /// Weights must be finite, non-negative and not all zero inside the window.
    fn evaluate_weighted_range(
        &self,
        values: &[f64],
        weights: &[f64],
        begin: usize,
        length: usize,
    ) -> Result<f64, StatsError>;

    /// Evaluate over the whole arrays
    fn evaluate_weighted(&self, values: &[f64], weights: &[f64]) -> Result<f64, StatsError> {
        self.evaluate_weighted_range(values, weights, 0, values.len())
    }
}
