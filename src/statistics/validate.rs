//! Argument checks shared by the batch evaluators

use crate::traits::StatsError;

/// Check that `values[begin..begin + length]` exists
///
/// Returns `Ok(false)` for an empty window, which callers turn into NaN.
pub(crate) fn verify_values(values: &[f64], begin: usize, length: usize) -> Result<bool, StatsError> {
    match begin.checked_add(length) {
        Some(end) if end <= values.len() => Ok(length != 0),
        _ => Err(StatsError::WindowOutOfBounds {
            begin,
            length,
            len: values.len(),
        }),
    }
}

/// Check the window plus the weights inside it
///
/// Weights must match the values in length and, inside a non-empty window,
/// be finite, non-negative and contain at least one positive entry.
pub(crate) fn verify_weighted(
    values: &[f64],
    weights: &[f64],
    begin: usize,
    length: usize,
) -> Result<bool, StatsError> {
    if weights.len() != values.len() {
        return Err(StatsError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }
    let non_empty = verify_values(values, begin, length)?;
    if !non_empty {
        return Ok(false);
    }

    let mut has_positive = false;
    for (offset, &weight) in weights[begin..begin + length].iter().enumerate() {
        let index = begin + offset;
        if weight.is_nan() {
            return Err(StatsError::NotANumberWeight { index });
        }
        if weight.is_infinite() {
            return Err(StatsError::InfiniteWeight { index, weight });
        }
        if weight < 0.0 {
            return Err(StatsError::NegativeWeight { index, weight });
        }
        has_positive |= weight > 0.0;
    }
    if !has_positive {
        return Err(StatsError::NoPositiveWeight);
    }
    Ok(true)
}

/// Plain left-to-right sum
pub(crate) fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, &v| acc + v)
}

/// Left-to-right sum of `values[i] * weights[i]`
pub(crate) fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    values
        .iter()
        .zip(weights)
        .fold(0.0, |acc, (&v, &w)| acc + v * w)
}
