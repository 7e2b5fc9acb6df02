//! Portfolio problem instance data
//!
//! A problem instance consists of per-security market data, one or more
//! factor-exposure targets, and a bound on how many securities may be
//! selected. Instances are immutable once generated; the generator is
//! explicitly seeded so every solve on the same instance is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One factor-exposure target
///
/// Contributes `weight · (Σ_c loading_c · A_c · y_c − target)²` to the
/// objective, pulling the selected portfolio's exposure toward `target`.
#[derive(Debug, Clone)]
pub struct Factor {
    /// Per-security loading on this factor
    pub loadings: Vec<f64>,
    /// Target exposure
    pub target: f64,
    /// Objective weight of this factor
    pub weight: f64,
}

/// Immutable portfolio problem parameters
///
/// Field naming follows the underlying model: for security `c`, `p_c` is the
/// price, `m_c`/`M_c` the min/max holding, `i_c` the issuance size, `delta_c`
/// the trading increment. The derived scalar weight
/// `A_c = (m_c + min(M_c, i_c)) / (2·δ_c)` is what enters the objective.
#[derive(Debug, Clone)]
pub struct ProblemParameters {
    /// Price per security
    pub prices: Vec<f64>,
    /// Minimum holding per security
    pub min_holding: Vec<f64>,
    /// Maximum holding per security
    pub max_holding: Vec<f64>,
    /// Issuance size per security
    pub issuance: Vec<f64>,
    /// Trading increment per security
    pub increment: Vec<f64>,
    /// Factor-exposure targets
    pub factors: Vec<Factor>,
    /// Maximum number of securities that may be selected (the bound N)
    ///
    /// Signed so that an invalid negative bound is representable and can be
    /// rejected by the encoder instead of silently wrapping.
    pub max_selected: i64,
    /// Derived per-security weights `A_c`
    pub weights: Vec<f64>,
}

impl ProblemParameters {
    /// Generate a sample problem instance with random but plausible data
    ///
    /// Distributions mirror market-like magnitudes: prices near par,
    /// single-digit holdings, one factor with loadings in [-0.5, 1.5) and a
    /// target in [5, 10). The bound is N = n/2.
    pub fn random(num_securities: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let prices: Vec<f64> = (0..num_securities)
            .map(|_| rng.gen_range(90.0..110.0))
            .collect();
        let min_holding: Vec<f64> = (0..num_securities)
            .map(|_| rng.gen_range(1.0..5.0))
            .collect();
        let max_holding: Vec<f64> = min_holding
            .iter()
            .map(|&m| m + rng.gen_range(10.0..20.0))
            .collect();
        let issuance: Vec<f64> = (0..num_securities)
            .map(|_| rng.gen_range(5.0..15.0))
            .collect();
        let increment = vec![1.0; num_securities];

        let loadings: Vec<f64> = (0..num_securities)
            .map(|_| rng.gen_range(-0.5..1.5))
            .collect();
        let factors = vec![Factor {
            loadings,
            target: rng.gen_range(5.0..10.0),
            weight: 1.0,
        }];

        let weights = derive_weights(&min_holding, &max_holding, &issuance, &increment);

        Self {
            prices,
            min_holding,
            max_holding,
            issuance,
            increment,
            factors,
            max_selected: (num_securities / 2) as i64,
            weights,
        }
    }

    /// Number of securities (decision variables) in the instance
    pub fn num_securities(&self) -> usize {
        self.weights.len()
    }

    /// Exposure of a selection to one factor: `Σ_c loading_c · A_c · y_c`
    pub fn exposure(&self, factor: &Factor, selection: &[u8]) -> f64 {
        factor
            .loadings
            .iter()
            .zip(self.weights.iter())
            .zip(selection.iter())
            .map(|((&beta, &a), &y)| beta * a * f64::from(y))
            .sum()
    }

    /// Direct evaluation of the factor objective for a selection
    ///
    /// `Σ_f weight_f · (exposure_f − target_f)²`, without any penalty term.
    pub fn objective_value(&self, selection: &[u8]) -> f64 {
        self.factors
            .iter()
            .map(|f| {
                let dev = self.exposure(f, selection) - f.target;
                f.weight * dev * dev
            })
            .sum()
    }
}

/// `A_c = (m_c + min(M_c, i_c)) / (2·δ_c)`
fn derive_weights(
    min_holding: &[f64],
    max_holding: &[f64],
    issuance: &[f64],
    increment: &[f64],
) -> Vec<f64> {
    min_holding
        .iter()
        .zip(max_holding.iter())
        .zip(issuance.iter())
        .zip(increment.iter())
        .map(|(((&m, &max), &i), &delta)| (m + max.min(i)) / (2.0 * delta))
        .collect()
}
