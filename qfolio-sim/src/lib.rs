//! QUBO solvers over a statevector oracle
//!
//! This crate drives the whole solve pipeline: a [`CostOracle`] executes
//! parameterized circuits, a derivative-free minimizer tunes their angles,
//! and four interchangeable [`Solver`] variants package the pieces:
//!
//! - [`ClassicalSolver`]: simulated-annealing baseline
//! - [`VqeSolver`]: expectation-based variational eigensolver
//! - [`CvarVqeSolver`]: tail-risk (CVaR) variational eigensolver
//! - [`QaoaSolver`]: alternating-operator ansatz
//!
//! # Example
//! ```
//! use qfolio_core::{ProblemParameters, QuboModel};
//! use qfolio_sim::{Solver, VqeSolver};
//!
//! let params = ProblemParameters::random(2, 42);
//! let model = QuboModel::from_parameters(&params).unwrap();
//!
//! let mut solver = VqeSolver::new(20, 7);
//! let outcome = solver.solve(&model).unwrap();
//! assert_eq!(outcome.solution.bits().len(), model.num_variables());
//! ```

pub mod analysis;
pub mod annealing;
pub mod ansatz;
pub mod error;
pub mod minimize;
pub mod observable;
pub mod oracle;
pub mod risk;
pub mod solution;
pub mod solver;
pub mod variational;

pub use analysis::{analyze, SolutionReport};
pub use annealing::{Annealer, AnnealerConfig};
pub use ansatz::{AlternatingAnsatz, Ansatz, HardwareEfficientAnsatz};
pub use error::{Result, SolverError};
pub use minimize::{MinimizeOutcome, NelderMead, NelderMeadConfig};
pub use observable::DiagonalObservable;
pub use oracle::{CostOracle, StateVectorOracle};
pub use risk::conditional_value_at_risk;
pub use solution::{ConvergenceHistory, HistoryEntry, Solution, SolveOutcome};
pub use solver::{ClassicalSolver, CvarVqeSolver, QaoaSolver, Solver, VqeSolver};
pub use variational::{CostPolicy, VariationalConfig, VariationalSolver};
