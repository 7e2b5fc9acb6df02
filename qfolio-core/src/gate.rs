//! Quantum gate trait and gate operations

use crate::error::CircuitError;
use crate::QubitId;
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Trait for quantum gate operations
///
/// Gates are stateless and reusable across circuits. The statevector oracle
/// consumes gates through [`Gate::matrix`], with dedicated fast paths for the
/// controlled gates it recognizes by name.
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CNOT", "RZ")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on
    fn num_qubits(&self) -> usize;

    /// Whether this gate is hermitian (self-adjoint)
    fn is_hermitian(&self) -> bool {
        false
    }

    /// The unitary matrix for this gate, flattened in row-major order
    ///
    /// For an n-qubit gate the returned vector has length `(2^n)^2`.
    fn matrix(&self) -> Vec<Complex64>;
}

/// A gate applied to specific qubits
#[derive(Clone)]
pub struct GateOp {
    gate: Arc<dyn Gate>,
    qubits: SmallVec<[QubitId; 2]>, // Most gates are 1-2 qubits
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if the qubit count doesn't match the gate, or if the
    /// same qubit appears twice.
    pub fn new(gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<Self, CircuitError> {
        if qubits.len() != gate.num_qubits() {
            return Err(CircuitError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                qubits.len(),
            ));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(CircuitError::DuplicateQubit(qubits[i]));
                }
            }
        }

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Get the qubits this operation acts on
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}
