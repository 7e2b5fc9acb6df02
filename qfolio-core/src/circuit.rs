//! Quantum circuit representation

use crate::error::CircuitError;
use crate::gate::{Gate, GateOp};
use crate::QubitId;
use std::sync::Arc;

/// A quantum circuit
///
/// Contains a sequence of gate operations applied to qubits. The ansatz
/// builders produce one of these per parameter vector; the oracle replays it
/// against a fresh |0…0⟩ state.
///
/// # Example
/// ```
/// use qfolio_core::Circuit;
///
/// let circuit = Circuit::new(3);
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.len(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Create a circuit with pre-allocated operation capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Self {
        assert!(num_qubits > 0, "circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Add a gate operation to the circuit
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds, the operand count
    /// doesn't match the gate, or an operand repeats.
    pub fn add_gate(&mut self, gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<(), CircuitError> {
        for &qubit in qubits {
            if qubit.index() >= self.num_qubits {
                return Err(CircuitError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }

        let op = GateOp::new(gate, qubits)?;
        self.operations.push(op);
        Ok(())
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &GateOp> {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::{CNot, Hadamard};

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new(2);
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_gates() {
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(0)]).unwrap();
        circuit
            .add_gate(Arc::new(CNot), &[QubitId::new(0), QubitId::new(1)])
            .unwrap();
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_out_of_bounds_qubit() {
        let mut circuit = Circuit::new(2);
        let result = circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(5)]);
        assert!(matches!(result, Err(CircuitError::InvalidQubit(5, 2))));
    }

    #[test]
    #[should_panic(expected = "at least one qubit")]
    fn test_zero_qubit_circuit_panics() {
        let _ = Circuit::new(0);
    }
}
