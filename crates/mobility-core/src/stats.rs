//! Empty-safe reductions over per-segment vectors
//!
//! An empty vector reduces to `0.0` rather than NaN, so an hour with no
//! flights stays distinguishable from an hour with no observed data.

use statrs::statistics::Statistics;

/// Arithmetic mean, `0.0` for an empty slice
pub fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().mean()
    }
}

/// Population standard deviation (divisor `n`), `0.0` for an empty slice
pub fn std_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().population_std_dev()
    }
}

/// Mean and standard deviation of one vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub mean: f64,
    pub sd: f64,
}

impl Moments {
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean_or_zero(values),
            sd: std_or_zero(values),
        }
    }
}

/// `sum(weights[i] * values[i]) / sum(weights)`, `None` when the weights sum to zero
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    debug_assert_eq!(values.len(), weights.len());
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    Some(
        values
            .iter()
            .zip(weights)
            .map(|(v, w)| v * w / total)
            .sum(),
    )
}
