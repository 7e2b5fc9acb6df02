//! Core types for QUBO portfolio optimization
//!
//! This crate provides the problem-side and circuit-side foundations shared by
//! every solver in the workspace:
//!
//! - [`ProblemParameters`]: portfolio instance data (prices, holdings, factor
//!   loadings, selection bound)
//! - [`QuboModel`]: a binary quadratic objective with a penalized inequality
//!   constraint, built from problem parameters
//! - [`IsingModel`]: the spin-representation rewrite of a QUBO
//! - [`Circuit`] and [`Gate`]: the parameterized-circuit description consumed
//!   by the statevector oracle
//!
//! # Example
//! ```
//! use qfolio_core::{ProblemParameters, QuboModel};
//!
//! let params = ProblemParameters::random(4, 42);
//! let model = QuboModel::from_parameters(&params).unwrap();
//! // 4 decision bits plus ceil(log2(N+1)) slack bits
//! assert_eq!(model.num_variables(), 6);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod gates;
pub mod ising;
pub mod params;
pub mod qubit;
pub mod qubo;

// Re-exports for convenience
pub use circuit::Circuit;
pub use error::{CircuitError, ModelError};
pub use gate::{Gate, GateOp};
pub use ising::IsingModel;
pub use num_complex::Complex64;
pub use params::{Factor, ProblemParameters};
pub use qubit::QubitId;
pub use qubo::{QuboModel, Variable};
