//! Resizable storage for raw observations
//!
//! [`ResizableDoubleArray`] keeps a window of `f64` values that can grow at
//! the end, shrink at either end, or roll forward as a fixed-size FIFO. It is
//! independent of the moment accumulators and is meant for statistics that
//! need to keep the data around, e.g. for a two-pass batch evaluation.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "statistics")]
//! # {
//! use storeless::array::ResizableDoubleArray;
//! use storeless::statistics::Variance;
//! use storeless::traits::UnivariateStatistic;
//!
//! let window = ResizableDoubleArray::new();
//! for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     window.add_element(v);
//! }
//!
//! let var = Variance::population();
//! let result = window.compute(|values, start, len| var.evaluate_range(values, start, len));
//! assert!((result.unwrap() - 4.0).abs() < 1e-12);
//! # }
//! ```

mod resizable;

pub use resizable::{
    ExpansionMode, ResizableConfig, ResizableDoubleArray, DEFAULT_CONTRACTION_DELTA,
    DEFAULT_EXPANSION_FACTOR, DEFAULT_INITIAL_CAPACITY, MAX_CAPACITY,
};
