//! Parameterized circuit templates
//!
//! Two ansatz families are provided: a hardware-efficient rotation layer
//! with chain entanglement (used by the expectation and tail-risk variants)
//! and an alternating problem/mixer evolution (the alternating-operator
//! variant). Both are pure functions from a parameter vector to a circuit.

use crate::error::{Result, SolverError};
use qfolio_core::gates::{CNot, Hadamard, RotationX, RotationY, RotationZ, CZ};
use qfolio_core::{Circuit, IsingModel, QubitId};
use std::f64::consts::PI;
use std::sync::Arc;

/// A parameterized circuit template
///
/// The parameter layout is positional and fixed per implementation; the
/// minimizer's vector is interpreted against it, so implementations must
/// never reorder parameters between calls.
pub trait Ansatz {
    /// Number of qubits in the produced circuits
    fn num_qubits(&self) -> usize;

    /// Length of the expected parameter vector
    fn num_parameters(&self) -> usize;

    /// Half-open range initial angles are drawn from
    fn initial_range(&self) -> (f64, f64);

    /// Construct the circuit for a parameter vector
    ///
    /// # Errors
    /// Returns [`SolverError::ParameterCount`] on a length mismatch.
    fn build(&self, params: &[f64]) -> Result<Circuit>;
}

fn check_parameter_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SolverError::ParameterCount { expected, actual });
    }
    Ok(())
}

/// Hardware-efficient ansatz: per-qubit RY·RZ rotations and a CZ chain
///
/// Parameter layout: `[ry_0, rz_0, ry_1, rz_1, …]`, two angles per qubit.
#[derive(Debug, Clone)]
pub struct HardwareEfficientAnsatz {
    num_qubits: usize,
}

impl HardwareEfficientAnsatz {
    /// Create the ansatz for a qubit count
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits }
    }
}

impl Ansatz for HardwareEfficientAnsatz {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn num_parameters(&self) -> usize {
        2 * self.num_qubits
    }

    fn initial_range(&self) -> (f64, f64) {
        (0.0, 2.0 * PI)
    }

    fn build(&self, params: &[f64]) -> Result<Circuit> {
        check_parameter_count(self.num_parameters(), params.len())?;

        let mut circuit = Circuit::with_capacity(self.num_qubits, 3 * self.num_qubits);
        for q in 0..self.num_qubits {
            circuit.add_gate(Arc::new(RotationY::new(params[2 * q])), &[QubitId::new(q)])?;
            circuit.add_gate(Arc::new(RotationZ::new(params[2 * q + 1])), &[QubitId::new(q)])?;
        }
        for q in 0..self.num_qubits.saturating_sub(1) {
            circuit.add_gate(Arc::new(CZ), &[QubitId::new(q), QubitId::new(q + 1)])?;
        }
        Ok(circuit)
    }
}

/// Alternating problem/mixer evolution ansatz
///
/// Prepares the uniform superposition, then applies `layers` rounds of
/// problem-Hamiltonian evolution followed by mixer evolution. The mixer is
/// the sum of single-spin X flips. Parameter layout is all problem couplings
/// first, then all mixer couplings: `[γ_1…γ_p, β_1…β_p]`.
#[derive(Debug, Clone)]
pub struct AlternatingAnsatz {
    ising: IsingModel,
    layers: usize,
}

impl AlternatingAnsatz {
    /// Create the ansatz from the problem Hamiltonian and a layer count
    pub fn new(ising: IsingModel, layers: usize) -> Self {
        Self { ising, layers }
    }

    /// Number of evolution layers p
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// exp(−i·γ·H_problem): RZ(2γh) per field, CNOT·RZ(2γJ)·CNOT per coupling
    fn apply_problem_layer(&self, circuit: &mut Circuit, gamma: f64) -> Result<()> {
        for &(i, h) in self.ising.fields() {
            circuit.add_gate(Arc::new(RotationZ::new(2.0 * gamma * h)), &[QubitId::new(i)])?;
        }
        for (&(i, j), &coupling) in self.ising.couplings() {
            circuit.add_gate(Arc::new(CNot), &[QubitId::new(i), QubitId::new(j)])?;
            circuit.add_gate(
                Arc::new(RotationZ::new(2.0 * gamma * coupling)),
                &[QubitId::new(j)],
            )?;
            circuit.add_gate(Arc::new(CNot), &[QubitId::new(i), QubitId::new(j)])?;
        }
        Ok(())
    }

    /// exp(−i·β·Σ X_i): RX(2β) on every spin
    fn apply_mixer_layer(&self, circuit: &mut Circuit, beta: f64) -> Result<()> {
        for q in 0..self.num_qubits() {
            circuit.add_gate(Arc::new(RotationX::new(2.0 * beta)), &[QubitId::new(q)])?;
        }
        Ok(())
    }
}

impl Ansatz for AlternatingAnsatz {
    fn num_qubits(&self) -> usize {
        self.ising.num_spins()
    }

    fn num_parameters(&self) -> usize {
        2 * self.layers
    }

    fn initial_range(&self) -> (f64, f64) {
        (0.0, PI)
    }

    fn build(&self, params: &[f64]) -> Result<Circuit> {
        check_parameter_count(self.num_parameters(), params.len())?;
        let (problem_couplings, mixer_couplings) = params.split_at(self.layers);

        let mut circuit = Circuit::new(self.num_qubits());
        for q in 0..self.num_qubits() {
            circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(q)])?;
        }
        for layer in 0..self.layers {
            self.apply_problem_layer(&mut circuit, problem_couplings[layer])?;
            self.apply_mixer_layer(&mut circuit, mixer_couplings[layer])?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfolio_core::{ProblemParameters, QuboModel};

    fn small_ising() -> IsingModel {
        let params = ProblemParameters::random(3, 17);
        let model = QuboModel::from_parameters(&params).unwrap();
        IsingModel::from_qubo(&model).unwrap()
    }

    #[test]
    fn test_hardware_efficient_layout() {
        let ansatz = HardwareEfficientAnsatz::new(4);
        assert_eq!(ansatz.num_parameters(), 8);
        let circuit = ansatz.build(&vec![0.3; 8]).unwrap();
        // 2 rotations per qubit plus 3 chain entanglers
        assert_eq!(circuit.len(), 8 + 3);
        assert_eq!(circuit.num_qubits(), 4);
    }

    #[test]
    fn test_hardware_efficient_wrong_parameter_count() {
        let ansatz = HardwareEfficientAnsatz::new(3);
        let result = ansatz.build(&[0.1, 0.2]);
        assert!(matches!(
            result,
            Err(SolverError::ParameterCount { expected: 6, actual: 2 })
        ));
    }

    #[test]
    fn test_alternating_gate_count() {
        let ising = small_ising();
        let n = ising.num_spins();
        let fields = ising.fields().len();
        let couplings = ising.couplings().len();

        let layers = 2;
        let ansatz = AlternatingAnsatz::new(ising, layers);
        assert_eq!(ansatz.num_parameters(), 4);

        let circuit = ansatz.build(&[0.1, 0.2, 0.3, 0.4]).unwrap();
        let per_layer = fields + 3 * couplings + n;
        assert_eq!(circuit.len(), n + layers * per_layer);
    }

    #[test]
    fn test_alternating_parameter_split_is_positional() {
        // With all problem couplings at zero the problem layers are pure
        // identity rotations; the circuit still has the same shape, so the
        // split must come from position, not value.
        let ising = small_ising();
        let ansatz = AlternatingAnsatz::new(ising, 2);
        let a = ansatz.build(&[0.0, 0.0, 0.5, 0.5]).unwrap();
        let b = ansatz.build(&[0.5, 0.5, 0.0, 0.0]).unwrap();
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_initial_ranges() {
        let hw = HardwareEfficientAnsatz::new(2);
        assert_eq!(hw.initial_range(), (0.0, 2.0 * PI));
        let alt = AlternatingAnsatz::new(small_ising(), 1);
        assert_eq!(alt.initial_range(), (0.0, PI));
    }
}
