//! Descriptive statistics built on the moment accumulators
//!
//! Each statistic works two ways:
//!
//! - **Streaming** via [`StorelessStatistic`](crate::traits::StorelessStatistic):
//!   feed values one at a time, read `result()` at any point.
//! - **Batch** via [`UnivariateStatistic`](crate::traits::UnivariateStatistic):
//!   evaluate a stored array with a multi-pass algorithm that is more accurate
//!   than the streaming update. Batch evaluation never changes streaming state.
//!
//! # Example
//!
//! ```
//! use storeless::statistics::{Mean, StandardDeviation};
//! use storeless::traits::{StorelessStatistic, UnivariateStatistic};
//!
//! let mut mean = Mean::new();
//! let mut sd = StandardDeviation::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     mean.increment(value);
//!     sd.increment(value);
//! }
//!
//! println!("Mean: {}", mean.result());
//! println!("Stddev: {}", sd.result());
//!
//! let batch = StandardDeviation::new().evaluate(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert!((batch - sd.result()).abs() < 1e-12);
//! ```

mod kurtosis;
mod mean;
mod semi_variance;
mod skewness;
mod std_dev;
mod validate;
mod variance;

pub use kurtosis::Kurtosis;
pub use mean::Mean;
pub use semi_variance::{Direction, SemiVariance, SemiVarianceConfig};
pub use skewness::Skewness;
pub use std_dev::StandardDeviation;
pub use variance::Variance;

/// Below this variance, skewness and kurtosis report 0
pub(crate) const NEAR_ZERO_VARIANCE: f64 = 10e-20;
