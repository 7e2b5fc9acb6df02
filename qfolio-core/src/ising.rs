//! QUBO → Ising (spin) transformation
//!
//! Rewrites a binary quadratic model over `x ∈ {0, 1}` into an equivalent
//! spin model over `s ∈ {+1, −1}` via the substitution `x = (1 − s)/2`. The
//! rewrite is pure algebra: for every assignment, the spin energy at
//! `s_i = 1 − 2·x_i` equals the QUBO energy at `x`.

use crate::error::ModelError;
use crate::qubo::QuboModel;
use std::collections::BTreeMap;

/// Coefficients below this magnitude are floating-point noise and are
/// dropped from the term set (the offset is kept exact regardless).
const TERM_TOLERANCE: f64 = 1e-12;

/// A spin Hamiltonian: `Σ h_i·Z_i + Σ J_ij·Z_i·Z_j + offset`
///
/// Field and coupling terms are sparse and ordered; spin indices follow the
/// variable order of the originating [`QuboModel`].
#[derive(Debug, Clone)]
pub struct IsingModel {
    num_spins: usize,
    fields: Vec<(usize, f64)>,
    couplings: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl IsingModel {
    /// Transform a QUBO into its spin representation
    ///
    /// Each diagonal coefficient `c` on variable `i` contributes `c/2` to the
    /// offset and `−c/2` to `h_i`; each off-diagonal `c` on `(i, j)`
    /// contributes `c/4` to the offset, `−c/4` to both fields, and `c/4` to
    /// `J_ij`.
    ///
    /// # Errors
    /// Returns [`ModelError::InconsistentModel`] if a coefficient references
    /// an index outside the model's variable list. That can only come from an
    /// encoder bug and is fatal.
    pub fn from_qubo(model: &QuboModel) -> Result<Self, ModelError> {
        let num_spins = model.num_variables();
        let check = |index: usize| {
            if index >= num_spins {
                Err(ModelError::InconsistentModel {
                    index,
                    num_variables: num_spins,
                })
            } else {
                Ok(())
            }
        };

        let mut h = vec![0.0; num_spins];
        let mut couplings: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut offset = model.offset();

        for (&i, &c) in model.linear() {
            check(i)?;
            offset += c / 2.0;
            h[i] -= c / 2.0;
        }

        for (&(i, j), &c) in model.quadratic() {
            check(i)?;
            check(j)?;
            offset += c / 4.0;
            h[i] -= c / 4.0;
            h[j] -= c / 4.0;
            *couplings.entry((i, j)).or_insert(0.0) += c / 4.0;
        }

        let fields: Vec<(usize, f64)> = h
            .into_iter()
            .enumerate()
            .filter(|(_, c)| c.abs() >= TERM_TOLERANCE)
            .collect();
        couplings.retain(|_, c| c.abs() >= TERM_TOLERANCE);

        Ok(Self {
            num_spins,
            fields,
            couplings,
            offset,
        })
    }

    /// Number of spins
    pub fn num_spins(&self) -> usize {
        self.num_spins
    }

    /// Sparse single-spin field terms `(index, h_i)`, in index order
    pub fn fields(&self) -> &[(usize, f64)] {
        &self.fields
    }

    /// Sparse coupling terms keyed by `(i, j)` with `i < j`
    pub fn couplings(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.couplings
    }

    /// Constant energy offset
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Energy of a spin assignment (`s_i ∈ {+1, −1}`)
    pub fn energy(&self, spins: &[i8]) -> f64 {
        let mut energy = self.offset;
        for &(i, h) in &self.fields {
            energy += h * f64::from(spins[i]);
        }
        for (&(i, j), &coupling) in &self.couplings {
            energy += coupling * f64::from(spins[i]) * f64::from(spins[j]);
        }
        energy
    }

    /// Energy of a computational basis state (bit `i` = 1 means spin −1)
    ///
    /// This is the eigenvalue of the Hamiltonian on basis state `state`, and
    /// equals the QUBO energy of the corresponding binary assignment.
    pub fn energy_for_basis(&self, state: u64) -> f64 {
        let spin = |i: usize| if (state >> i) & 1 == 1 { -1.0 } else { 1.0 };
        let mut energy = self.offset;
        for &(i, h) in &self.fields {
            energy += h * spin(i);
        }
        for (&(i, j), &coupling) in &self.couplings {
            energy += coupling * spin(i) * spin(j);
        }
        energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Factor, ProblemParameters};
    use approx::assert_relative_eq;

    fn three_variable_model() -> QuboModel {
        // 2 securities with N = 1 gives exactly 3 variables
        let params = ProblemParameters {
            prices: vec![100.0, 100.0],
            min_holding: vec![1.0, 1.0],
            max_holding: vec![3.0, 3.0],
            issuance: vec![1.0, 1.0],
            increment: vec![1.0, 1.0],
            factors: vec![Factor {
                loadings: vec![0.8, -0.4],
                target: 2.0,
                weight: 1.0,
            }],
            max_selected: 1,
            weights: vec![2.5, 3.0],
        };
        QuboModel::from_parameters(&params).unwrap()
    }

    #[test]
    fn test_spin_energy_equals_qubo_energy_for_all_assignments() {
        let model = three_variable_model();
        let ising = IsingModel::from_qubo(&model).unwrap();
        assert_eq!(ising.num_spins(), 3);

        for state in 0..8u64 {
            let bits: Vec<u8> = (0..3).map(|i| ((state >> i) & 1) as u8).collect();
            let spins: Vec<i8> = bits.iter().map(|&x| 1 - 2 * (x as i8)).collect();

            let qubo_energy = model.energy(&bits).unwrap();
            assert_relative_eq!(ising.energy(&spins), qubo_energy, epsilon = 1e-9);
            assert_relative_eq!(ising.energy_for_basis(state), qubo_energy, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_couplings_are_quarter_of_qubo_terms() {
        let model = three_variable_model();
        let ising = IsingModel::from_qubo(&model).unwrap();
        for (key, &j) in ising.couplings() {
            let q = model.quadratic()[key];
            assert_relative_eq!(j, q / 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tiny_terms_are_dropped() {
        let params = ProblemParameters {
            prices: vec![100.0],
            min_holding: vec![1.0],
            max_holding: vec![1.0],
            issuance: vec![1.0],
            increment: vec![1.0],
            // Loading of zero: the factor contributes nothing but a constant
            factors: vec![Factor {
                loadings: vec![0.0],
                target: 1.0,
                weight: 1.0,
            }],
            max_selected: 1,
            weights: vec![1.0],
        };
        let model = QuboModel::from_parameters(&params).unwrap();
        let ising = IsingModel::from_qubo(&model).unwrap();

        // Terms survive only where the penalty produces them; nothing with a
        // sub-tolerance magnitude is kept.
        for &(_, h) in ising.fields() {
            assert!(h.abs() >= TERM_TOLERANCE);
        }
        for &j in ising.couplings().values() {
            assert!(j.abs() >= TERM_TOLERANCE);
        }

        // Offset exactness: the all-zero assignment energy is preserved.
        let zero_energy = model.energy(&[0, 0]).unwrap();
        assert_relative_eq!(ising.energy(&[1, 1]), zero_energy, epsilon = 1e-12);
    }
}
