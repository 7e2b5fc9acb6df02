//! Solution-quality reporting

use crate::error::Result;
use crate::solution::{Solution, SolveOutcome};
use qfolio_core::{ProblemParameters, QuboModel};
use serde::Serialize;
use std::time::Duration;

/// Metrics for one solver's result
#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    /// Solver identifier
    pub solver: String,
    /// Full QUBO energy of the returned assignment (objective + penalty)
    pub qubo_energy: f64,
    /// Factor objective alone, evaluated directly from the parameters
    pub objective_value: f64,
    /// Number of securities selected
    pub selected: usize,
    /// The selection bound N
    pub bound: i64,
    /// Whether `selected ≤ N`, recomputed from the solution itself
    pub constraint_satisfied: bool,
    /// Cost evaluations spent (zero for the classical baseline)
    pub evaluations: usize,
    /// Lowest cost seen during optimization, if any was recorded
    pub best_cost: Option<f64>,
    /// Wall-clock solve time in seconds
    pub runtime_seconds: f64,
}

/// Score a solve outcome against its problem instance
///
/// The constraint flag is always recomputed from the solution's decision
/// bits, never taken from the solver, so a violation caused by an
/// insufficiently dominant penalty is reported truthfully.
pub fn analyze(
    solver: &str,
    outcome: &SolveOutcome,
    params: &ProblemParameters,
    model: &QuboModel,
    runtime: Duration,
) -> Result<SolutionReport> {
    let solution: &Solution = &outcome.solution;
    let selected = solution.selected_count();
    Ok(SolutionReport {
        solver: solver.to_string(),
        qubo_energy: model.energy(solution.bits())?,
        objective_value: params.objective_value(&solution.decision_bits()),
        selected,
        bound: params.max_selected,
        constraint_satisfied: selected as i64 <= params.max_selected,
        evaluations: outcome.history.len(),
        best_cost: outcome.history.best_cost(),
        runtime_seconds: runtime.as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::ConvergenceHistory;
    use approx::assert_relative_eq;
    use qfolio_core::qubo::Variable;

    fn fixture() -> (ProblemParameters, QuboModel) {
        let params = ProblemParameters::random(4, 42);
        let model = QuboModel::from_parameters(&params).unwrap();
        (params, model)
    }

    fn outcome_for(model: &QuboModel, state: u64) -> SolveOutcome {
        SolveOutcome {
            solution: Solution::from_basis(model.variables(), state),
            history: ConvergenceHistory::new(),
        }
    }

    #[test]
    fn test_constraint_flag_matches_recomputation() {
        let (params, model) = fixture();
        assert_eq!(params.max_selected, 2);

        // All four securities selected: violation
        let violating = outcome_for(&model, 0b001111);
        let report =
            analyze("test", &violating, &params, &model, Duration::from_millis(5)).unwrap();
        assert_eq!(report.selected, 4);
        assert!(!report.constraint_satisfied);

        // One selected: satisfied
        let feasible = outcome_for(&model, 0b000001);
        let report =
            analyze("test", &feasible, &params, &model, Duration::from_millis(5)).unwrap();
        assert_eq!(report.selected, 1);
        assert!(report.constraint_satisfied);
    }

    #[test]
    fn test_energies_match_model() {
        let (params, model) = fixture();
        let outcome = outcome_for(&model, 0b010101);
        let report = analyze("test", &outcome, &params, &model, Duration::ZERO).unwrap();

        assert_relative_eq!(
            report.qubo_energy,
            model.energy_for_basis(0b010101),
            epsilon = 1e-9
        );
        let decisions: Vec<u8> = outcome
            .solution
            .variables()
            .iter()
            .zip(outcome.solution.bits())
            .filter(|(v, _)| matches!(v, Variable::Decision(_)))
            .map(|(_, &b)| b)
            .collect();
        assert_relative_eq!(
            report.objective_value,
            params.objective_value(&decisions),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_report_serializes() {
        let (params, model) = fixture();
        let outcome = outcome_for(&model, 0);
        let report = analyze("vqe", &outcome, &params, &model, Duration::ZERO).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"solver\":\"vqe\""));
    }
}
