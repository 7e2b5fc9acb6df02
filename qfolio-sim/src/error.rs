//! Error types for the solver layer

use qfolio_core::{CircuitError, ModelError};
use qfolio_state::StateError;
use thiserror::Error;

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Errors that can occur while solving
///
/// Model and circuit errors are raised before any oracle call; the remaining
/// variants abort an in-progress solve with no retry.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Problem encoding or transform failure
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Circuit construction failure
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Statevector failure inside the oracle
    #[error(transparent)]
    State(#[from] StateError),

    /// A cost evaluation produced a non-finite value
    #[error("non-finite cost {cost} at evaluation {evaluation}, aborting solve")]
    NumericalInstability { evaluation: usize, cost: f64 },

    /// Tail fraction outside its valid range
    #[error("tail fraction {alpha} outside (0, 1]")]
    InvalidTailFraction { alpha: f64 },

    /// Tail aggregation over an empty batch
    #[error("cannot aggregate an empty energy batch")]
    EmptyEnergyBatch,

    /// Final measurement produced no outcomes to vote over
    #[error("final sampling returned no outcomes")]
    NoSamples,

    /// The minimizer needs at least one cost evaluation
    #[error("iteration budget must be at least 1")]
    ZeroIterationBudget,

    /// Parameter vector length doesn't match the ansatz layout
    #[error("ansatz expects {expected} parameters, got {actual}")]
    ParameterCount { expected: usize, actual: usize },

    /// The oracle has no execution path for a gate
    #[error("oracle cannot execute gate '{gate}'")]
    UnsupportedGate { gate: String },
}
