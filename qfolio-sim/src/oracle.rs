//! Cost oracle: circuit execution, expectation values, measurement sampling
//!
//! The solvers consume circuit execution through the [`CostOracle`] trait;
//! the provided implementation replays circuits against a dense statevector.
//! Calls are synchronous and blocking, and sampling is deterministic for a
//! fixed oracle seed.

use crate::error::{Result, SolverError};
use crate::observable::DiagonalObservable;
use qfolio_core::Circuit;
use qfolio_state::{sample_outcomes, StateVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability consumed by every variational solver
pub trait CostOracle {
    /// Expectation value of a diagonal observable under the circuit's state
    fn expectation(&mut self, circuit: &Circuit, observable: &DiagonalObservable) -> Result<f64>;

    /// Draw `shots` measurement outcomes, in sampling order
    fn sample(&mut self, circuit: &Circuit, shots: usize) -> Result<Vec<u64>>;
}

/// Statevector-backed oracle
///
/// Owns its RNG so repeated solves with the same seed reproduce the same
/// measurement statistics.
pub struct StateVectorOracle {
    rng: StdRng,
}

impl StateVectorOracle {
    /// Create an oracle with a fixed sampling seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an oracle seeded from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Evolve |0…0⟩ through the circuit
    fn run(&self, circuit: &Circuit) -> Result<StateVector> {
        let mut state = StateVector::new(circuit.num_qubits())?;
        for op in circuit.operations() {
            let qubits = op.qubits();
            match op.gate().name() {
                "CNOT" => state.apply_cnot(qubits[0].index(), qubits[1].index())?,
                "CZ" => state.apply_cz(qubits[0].index(), qubits[1].index())?,
                name => {
                    let m = op.gate().matrix();
                    if op.gate().num_qubits() != 1 || m.len() != 4 {
                        return Err(SolverError::UnsupportedGate {
                            gate: name.to_string(),
                        });
                    }
                    let matrix = [[m[0], m[1]], [m[2], m[3]]];
                    state.apply_single_qubit(&matrix, qubits[0].index())?;
                }
            }
        }
        Ok(state)
    }
}

impl CostOracle for StateVectorOracle {
    fn expectation(&mut self, circuit: &Circuit, observable: &DiagonalObservable) -> Result<f64> {
        let state = self.run(circuit)?;
        state
            .expectation_diagonal(observable.eigenvalues())
            .map_err(Into::into)
    }

    fn sample(&mut self, circuit: &Circuit, shots: usize) -> Result<Vec<u64>> {
        let state = self.run(circuit)?;
        let rng = &mut self.rng;
        sample_outcomes(&state, shots, &mut || rng.gen::<f64>()).map_err(Into::into)
    }
}
