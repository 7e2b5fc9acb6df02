//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// A state needs at least one qubit
    #[error("state must have at least one qubit")]
    EmptyState,

    /// Too many qubits to allocate a dense amplitude vector
    #[error("{num_qubits} qubits exceeds the dense-state limit of {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Dimension mismatch
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Sampling from an empty probability distribution
    #[error("cannot sample from an empty distribution")]
    EmptyDistribution,
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
