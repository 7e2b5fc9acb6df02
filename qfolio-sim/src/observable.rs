//! Diagonal cost observable
//!
//! The portfolio Hamiltonian contains only Z and ZZ terms, so it is diagonal
//! in the computational basis. The observable is therefore just the vector of
//! its eigenvalues, one per basis state, which makes expectation values a
//! single probability-weighted sum.

use qfolio_core::IsingModel;

/// Eigenvalues of the spin Hamiltonian's field and coupling terms
///
/// The constant offset is excluded; the solver adds it back when recording
/// convergence history, so histories stay in the original QUBO energy scale
/// while the minimizer sees the raw eigenvalue spectrum.
#[derive(Debug, Clone)]
pub struct DiagonalObservable {
    num_qubits: usize,
    eigenvalues: Vec<f64>,
}

impl DiagonalObservable {
    /// Build the eigenvalue table of an Ising Hamiltonian
    pub fn from_ising(ising: &IsingModel) -> Self {
        let num_qubits = ising.num_spins();
        let offset = ising.offset();
        let eigenvalues = (0..1u64 << num_qubits)
            .map(|state| ising.energy_for_basis(state) - offset)
            .collect();
        Self {
            num_qubits,
            eigenvalues,
        }
    }

    /// Number of qubits the observable acts on
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Eigenvalue per basis state
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }
}
