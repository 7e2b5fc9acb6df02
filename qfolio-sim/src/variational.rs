//! Shared variational solve loop
//!
//! Every variational variant is the same machine: draw random initial
//! angles, let a derivative-free minimizer drive cost evaluations through
//! the oracle, record each evaluation, then extract a discrete solution by
//! majority vote over a final batch of measurements. Variants differ only in
//! the ansatz they build circuits from and the policy that turns an oracle
//! call into a scalar cost.

use crate::ansatz::Ansatz;
use crate::error::{Result, SolverError};
use crate::minimize::{NelderMead, NelderMeadConfig};
use crate::observable::DiagonalObservable;
use crate::oracle::CostOracle;
use crate::risk::conditional_value_at_risk;
use crate::solution::{ConvergenceHistory, Solution, SolveOutcome};
use qfolio_core::{IsingModel, QuboModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// How a cost evaluation consults the oracle
#[derive(Debug, Clone, Copy)]
pub enum CostPolicy {
    /// Expectation of the spin Hamiltonian under the ansatz state
    Expectation,

    /// Tail-conditional mean over sampled bitstring energies
    ///
    /// Each of `shots` sampled outcomes is scored against the original QUBO
    /// (never the spin form); the cost is the mean of the worst
    /// `alpha`-fraction.
    TailRisk { alpha: f64, shots: usize },
}

/// Knobs shared by every variational variant
#[derive(Debug, Clone)]
pub struct VariationalConfig {
    /// Cost-evaluation budget for the minimizer
    pub max_evaluations: usize,
    /// Shot count for the final majority-vote measurement
    pub final_shots: usize,
    /// Seed for the initial-angle draw; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for VariationalConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 150,
            final_shots: 1000,
            seed: None,
        }
    }
}

/// The shared solve skeleton, parameterized by ansatz and cost policy
pub struct VariationalSolver<A> {
    ansatz: A,
    policy: CostPolicy,
    config: VariationalConfig,
}

impl<A: Ansatz> VariationalSolver<A> {
    /// Assemble a solver from its three policy pieces
    pub fn new(ansatz: A, policy: CostPolicy, config: VariationalConfig) -> Self {
        Self {
            ansatz,
            policy,
            config,
        }
    }

    /// Run the full variational loop against one model
    ///
    /// Fails fast on model/transform errors before the first oracle call;
    /// any oracle failure or non-finite cost aborts the solve with no retry.
    pub fn solve<O: CostOracle>(&self, model: &QuboModel, oracle: &mut O) -> Result<SolveOutcome> {
        if let CostPolicy::TailRisk { alpha, .. } = self.policy {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(SolverError::InvalidTailFraction { alpha });
            }
        }

        let ising = IsingModel::from_qubo(model)?;
        let observable = DiagonalObservable::from_ising(&ising);
        let ising_offset = ising.offset();

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (low, high) = self.ansatz.initial_range();
        let initial: Vec<f64> = (0..self.ansatz.num_parameters())
            .map(|_| rng.gen_range(low..high))
            .collect();

        let mut history = ConvergenceHistory::new();
        let minimizer = NelderMead::new(NelderMeadConfig::default());

        let outcome = {
            let history = &mut history;
            let cost_fn = |params: &[f64]| -> Result<f64> {
                let circuit = self.ansatz.build(params)?;
                let (raw, recorded) = match &self.policy {
                    CostPolicy::Expectation => {
                        let expectation = oracle.expectation(&circuit, &observable)?;
                        (expectation, expectation + ising_offset)
                    }
                    CostPolicy::TailRisk { alpha, shots } => {
                        let outcomes = oracle.sample(&circuit, *shots)?;
                        let energies: Vec<f64> = outcomes
                            .iter()
                            .map(|&o| model.energy_for_basis(o))
                            .collect();
                        let tail = conditional_value_at_risk(&energies, *alpha)?;
                        (tail, tail)
                    }
                };
                if !raw.is_finite() {
                    return Err(SolverError::NumericalInstability {
                        evaluation: history.len(),
                        cost: raw,
                    });
                }
                history.record(recorded, params);
                Ok(raw)
            };
            minimizer.minimize(cost_fn, &initial, self.config.max_evaluations)?
        };

        debug!(
            evaluations = outcome.evaluations,
            converged = outcome.converged,
            final_cost = outcome.cost,
            "variational optimization finished"
        );

        // Majority vote over a final measurement batch
        let final_circuit = self.ansatz.build(&outcome.parameters)?;
        let samples = oracle.sample(&final_circuit, self.config.final_shots)?;
        let counts = qfolio_state::SamplingResult::from_outcomes(&samples);
        let modal = counts.modal_outcome().ok_or(SolverError::NoSamples)?;
        let solution = Solution::from_basis(model.variables(), modal);

        if let Some(best) = history.best_cost() {
            info!(best_cost = best, "variational solve complete");
        }

        Ok(SolveOutcome { solution, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansatz::HardwareEfficientAnsatz;
    use crate::oracle::StateVectorOracle;
    use qfolio_core::{ProblemParameters, QuboModel};

    fn tiny_model() -> QuboModel {
        let params = ProblemParameters::random(2, 21);
        QuboModel::from_parameters(&params).unwrap()
    }

    fn config(max_evaluations: usize) -> VariationalConfig {
        VariationalConfig {
            max_evaluations,
            final_shots: 200,
            seed: Some(5),
        }
    }

    #[test]
    fn test_history_length_never_exceeds_budget() {
        let model = tiny_model();
        let solver = VariationalSolver::new(
            HardwareEfficientAnsatz::new(model.num_variables()),
            CostPolicy::Expectation,
            config(25),
        );
        let mut oracle = StateVectorOracle::new(1);
        let outcome = solver.solve(&model, &mut oracle).unwrap();

        assert!(!outcome.history.is_empty());
        assert!(outcome.history.len() <= 25);
        assert_eq!(outcome.solution.bits().len(), model.num_variables());
    }

    #[test]
    fn test_history_costs_are_in_qubo_scale() {
        // Every recorded cost must lie within the model's energy spectrum.
        let model = tiny_model();
        let spectrum: Vec<f64> = (0..1u64 << model.num_variables())
            .map(|s| model.energy_for_basis(s))
            .collect();
        let min = spectrum.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = spectrum.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let solver = VariationalSolver::new(
            HardwareEfficientAnsatz::new(model.num_variables()),
            CostPolicy::Expectation,
            config(20),
        );
        let mut oracle = StateVectorOracle::new(2);
        let outcome = solver.solve(&model, &mut oracle).unwrap();
        for cost in outcome.history.costs() {
            assert!(cost >= min - 1e-9 && cost <= max + 1e-9);
        }
    }

    #[test]
    fn test_tail_risk_policy_runs() {
        let model = tiny_model();
        let solver = VariationalSolver::new(
            HardwareEfficientAnsatz::new(model.num_variables()),
            CostPolicy::TailRisk {
                alpha: 0.25,
                shots: 64,
            },
            config(15),
        );
        let mut oracle = StateVectorOracle::new(8);
        let outcome = solver.solve(&model, &mut oracle).unwrap();
        assert!(outcome.history.len() <= 15);
    }

    #[test]
    fn test_invalid_tail_fraction_fails_before_solving() {
        let model = tiny_model();
        let solver = VariationalSolver::new(
            HardwareEfficientAnsatz::new(model.num_variables()),
            CostPolicy::TailRisk {
                alpha: 0.0,
                shots: 10,
            },
            config(10),
        );
        let mut oracle = StateVectorOracle::new(0);
        let result = solver.solve(&model, &mut oracle);
        assert!(matches!(
            result,
            Err(SolverError::InvalidTailFraction { .. })
        ));
    }

    #[test]
    fn test_seeded_solves_are_reproducible() {
        let model = tiny_model();
        let run = || {
            let solver = VariationalSolver::new(
                HardwareEfficientAnsatz::new(model.num_variables()),
                CostPolicy::Expectation,
                config(20),
            );
            let mut oracle = StateVectorOracle::new(4);
            solver.solve(&model, &mut oracle).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.solution.bits(), b.solution.bits());
        assert_eq!(a.history.costs(), b.history.costs());
    }
}
