//! Tail-conditional cost aggregation
//!
//! The risk-averse solver variant replaces the plain expectation with the
//! mean of the worst fraction of sampled energies (a CVaR statistic under a
//! minimization objective). Optimizing this pushes probability mass away
//! from high-energy outcomes rather than just lowering the mean.

use crate::error::{Result, SolverError};

/// Mean of the `⌊alpha·M⌋` highest energies in a batch of M samples
///
/// The batch is sorted descending and the top slice averaged; a tail that
/// rounds down to zero samples is clamped to one so the statistic is always
/// defined. `alpha = 1` reduces to the arithmetic mean of the whole batch.
///
/// # Errors
/// - [`SolverError::InvalidTailFraction`] unless `0 < alpha ≤ 1`
/// - [`SolverError::EmptyEnergyBatch`] for an empty batch
pub fn conditional_value_at_risk(energies: &[f64], alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(SolverError::InvalidTailFraction { alpha });
    }
    if energies.is_empty() {
        return Err(SolverError::EmptyEnergyBatch);
    }

    let mut sorted = energies.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let tail = ((alpha * energies.len() as f64).floor() as usize).max(1);
    Ok(sorted[..tail].iter().sum::<f64>() / tail as f64)
}
