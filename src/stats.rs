use crate::error::Error;
use crate::types::Sample;
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub sigma: f64,
}

impl SummaryStats {
    /// Compute the summary of the y-values of `samples`.
    ///
    /// # Errors
    /// Returns [`Error::EmptySeries`] if there are no samples.
    pub fn compute(samples: &[Sample]) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::EmptySeries);
        }
        let vals: Vec<_> = samples.iter().map(|s| s.y).collect();
        let mean = compute_mean(&vals);
        Ok(Self {
            mean,
            sigma: compute_pop_var(&vals, mean).sqrt(),
        })
    }
}

fn compute_mean(vals: &[f64]) -> f64 {
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Variance with divisor `n`, not `n - 1`.
fn compute_pop_var(vals: &[f64], mean: f64) -> f64 {
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / vals.len() as f64
}
