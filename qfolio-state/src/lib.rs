//! Dense quantum state simulation
//!
//! This crate provides the statevector machinery behind the cost oracle: a
//! dense amplitude vector with in-place gate application, probability
//! queries, diagonal-observable expectation values, and multi-shot
//! measurement sampling through a Walker alias table.
//!
//! # Example
//! ```
//! use qfolio_state::StateVector;
//! use num_complex::Complex64;
//!
//! let h = std::f64::consts::FRAC_1_SQRT_2;
//! let hadamard = [
//!     [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
//!     [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
//! ];
//!
//! let mut state = StateVector::new(2).unwrap();
//! state.apply_single_qubit(&hadamard, 0).unwrap();
//! assert!(state.is_normalized(1e-10));
//! ```

pub mod error;
pub mod sampling;
pub mod state_vector;

pub use error::{Result, StateError};
pub use num_complex::Complex64;
pub use sampling::{sample_outcomes, AliasTable, SamplingResult};
pub use state_vector::StateVector;
