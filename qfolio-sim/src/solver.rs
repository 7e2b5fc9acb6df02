//! The four solver variants behind one capability
//!
//! A [`Solver`] takes a QUBO and returns a solution plus convergence
//! history. The classical variant delegates to the annealer; the three
//! variational variants share [`VariationalSolver`] and differ only in
//! ansatz and cost policy, mirroring how the problem was framed: one loop,
//! several policies.

use crate::annealing::{Annealer, AnnealerConfig};
use crate::ansatz::{AlternatingAnsatz, HardwareEfficientAnsatz};
use crate::error::Result;
use crate::oracle::StateVectorOracle;
use crate::solution::{ConvergenceHistory, Solution, SolveOutcome};
use crate::variational::{CostPolicy, VariationalConfig, VariationalSolver};
use qfolio_core::{IsingModel, QuboModel};
use tracing::info;

/// A strategy that can solve a QUBO
pub trait Solver {
    /// Short identifier used in reports and logs
    fn name(&self) -> &'static str;

    /// Solve the model
    fn solve(&mut self, model: &QuboModel) -> Result<SolveOutcome>;
}

/// Simulated-annealing baseline
pub struct ClassicalSolver {
    annealer: Annealer,
}

impl ClassicalSolver {
    /// Create the baseline with default reads/sweeps
    pub fn new(seed: u64) -> Self {
        Self {
            annealer: Annealer::new(AnnealerConfig::default(), seed),
        }
    }

    /// Create the baseline with an explicit schedule
    pub fn with_config(config: AnnealerConfig, seed: u64) -> Self {
        Self {
            annealer: Annealer::new(config, seed),
        }
    }
}

impl Solver for ClassicalSolver {
    fn name(&self) -> &'static str {
        "classical"
    }

    fn solve(&mut self, model: &QuboModel) -> Result<SolveOutcome> {
        let (bits, energy) = self.annealer.sample_qubo(model)?;
        info!(energy, "classical annealer finished");
        Ok(SolveOutcome {
            solution: Solution::new(model.variables().to_vec(), bits),
            history: ConvergenceHistory::new(),
        })
    }
}

/// Expectation-based variational eigensolver
pub struct VqeSolver {
    config: VariationalConfig,
    oracle_seed: u64,
}

impl VqeSolver {
    /// Create a VQE solver with an evaluation budget and seed
    pub fn new(max_evaluations: usize, seed: u64) -> Self {
        Self {
            config: VariationalConfig {
                max_evaluations,
                final_shots: 1000,
                seed: Some(seed),
            },
            oracle_seed: seed,
        }
    }
}

impl Solver for VqeSolver {
    fn name(&self) -> &'static str {
        "vqe"
    }

    fn solve(&mut self, model: &QuboModel) -> Result<SolveOutcome> {
        let ansatz = HardwareEfficientAnsatz::new(model.num_variables());
        let solver = VariationalSolver::new(ansatz, CostPolicy::Expectation, self.config.clone());
        let mut oracle = StateVectorOracle::new(self.oracle_seed);
        solver.solve(model, &mut oracle)
    }
}

/// Risk-averse variational eigensolver (tail-conditional cost)
pub struct CvarVqeSolver {
    alpha: f64,
    shots: usize,
    config: VariationalConfig,
    oracle_seed: u64,
}

impl CvarVqeSolver {
    /// Create a CVaR-VQE solver averaging the worst `alpha` fraction of
    /// `shots` samples per evaluation
    pub fn new(alpha: f64, max_evaluations: usize, seed: u64) -> Self {
        Self {
            alpha,
            shots: 200,
            config: VariationalConfig {
                max_evaluations,
                final_shots: 1000,
                seed: Some(seed),
            },
            oracle_seed: seed,
        }
    }
}

impl Solver for CvarVqeSolver {
    fn name(&self) -> &'static str {
        "cvar"
    }

    fn solve(&mut self, model: &QuboModel) -> Result<SolveOutcome> {
        let ansatz = HardwareEfficientAnsatz::new(model.num_variables());
        let solver = VariationalSolver::new(
            ansatz,
            CostPolicy::TailRisk {
                alpha: self.alpha,
                shots: self.shots,
            },
            self.config.clone(),
        );
        let mut oracle = StateVectorOracle::new(self.oracle_seed);
        solver.solve(model, &mut oracle)
    }
}

/// Alternating-operator ansatz solver
pub struct QaoaSolver {
    layers: usize,
    config: VariationalConfig,
    oracle_seed: u64,
}

impl QaoaSolver {
    /// Create a QAOA solver with `layers` evolution rounds
    pub fn new(layers: usize, max_evaluations: usize, seed: u64) -> Self {
        Self {
            layers,
            config: VariationalConfig {
                max_evaluations,
                final_shots: 1000,
                seed: Some(seed),
            },
            oracle_seed: seed,
        }
    }
}

impl Solver for QaoaSolver {
    fn name(&self) -> &'static str {
        "qaoa"
    }

    fn solve(&mut self, model: &QuboModel) -> Result<SolveOutcome> {
        let ising = IsingModel::from_qubo(model)?;
        let ansatz = AlternatingAnsatz::new(ising, self.layers);
        let solver = VariationalSolver::new(ansatz, CostPolicy::Expectation, self.config.clone());
        let mut oracle = StateVectorOracle::new(self.oracle_seed);
        solver.solve(model, &mut oracle)
    }
}
