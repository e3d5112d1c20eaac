//! # Storeless
//!
//! Numerically stable streaming statistics for Rust.
//!
//! Storeless computes descriptive statistics either one value at a time, in
//! constant memory, or over a stored array with more accurate multi-pass
//! algorithms. It also provides a resizable `f64` buffer for statistics that
//! need to keep their observations.
//!
//! ## Features
//!
//! - **Moments**: First to fourth central moment accumulators with
//!   Welford-style online updates
//! - **Statistics**: Mean, variance, standard deviation, skewness, kurtosis
//!   and semivariance, streaming or batch, with optional weights
//! - **Shared accumulators**: Several statistics can observe one moment
//! - **Resizable array**: Growable FIFO window with a configurable
//!   expansion/contraction policy
//!
//! ## Quick Start
//!
//! ```rust
//! use storeless::prelude::*;
//!
//! let mut var = Variance::new();
//! for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     var.increment(x);
//! }
//! println!("Sample variance: {}", var.result());
//!
//! let batch = Variance::population().evaluate(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert!((batch - 1.25).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! Algorithm families:
//! - `statistics` (default): derived statistics (moments are always available)
//! - `array` (default): `ResizableDoubleArray`, requires `std`
//! - `full`: Enable everything
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Serialization of moments and the resizable array
//! - `log`: Emit `log` records from the array's resize policy

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// must come first so the logging macros are in scope below
mod fmt;

mod math;

// Core traits always available
pub mod moment;
pub mod traits;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "array")]
#[cfg_attr(docsrs, doc(cfg(feature = "array")))]
pub mod array;

pub mod prelude {
    pub use crate::moment::{share, FirstMoment, FourthMoment, SecondMoment, ThirdMoment};
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{
        Kurtosis, Mean, SemiVariance, Skewness, StandardDeviation, Variance,
    };

    #[cfg(feature = "array")]
    pub use crate::array::ResizableDoubleArray;
}

#[cfg(feature = "statistics")]
pub use statistics::{Mean, StandardDeviation, Variance};

#[cfg(feature = "array")]
pub use array::ResizableDoubleArray;
