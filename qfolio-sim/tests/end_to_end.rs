//! End-to-end solves on a small instance: every solver variant runs the full
//! pipeline and the reported metrics are checked against direct
//! recomputation from the returned solution.

use std::time::Instant;

use qfolio_core::{IsingModel, ProblemParameters, QuboModel, Variable};
use qfolio_sim::{
    analyze, AnnealerConfig, ClassicalSolver, CvarVqeSolver, QaoaSolver, Solver, VqeSolver,
};

fn four_security_instance() -> (ProblemParameters, QuboModel) {
    let params = ProblemParameters::random(4, 42);
    let model = QuboModel::from_parameters(&params).unwrap();
    (params, model)
}

#[test]
fn four_securities_give_six_variables() {
    let (params, model) = four_security_instance();
    assert_eq!(params.max_selected, 2);

    // N = 2 needs ceil(log2(3)) = 2 slack bits: 4 + 2 = 6 variables
    assert_eq!(model.num_variables(), 6);
    let decisions = model
        .variables()
        .iter()
        .filter(|v| matches!(v, Variable::Decision(_)))
        .count();
    let slacks = model
        .variables()
        .iter()
        .filter(|v| matches!(v, Variable::Slack(_)))
        .count();
    assert_eq!(decisions, 4);
    assert_eq!(slacks, 2);

    assert!(model.linear().values().any(|c| c.abs() > 1e-12));
    assert!(model.quadratic().values().any(|c| c.abs() > 1e-12));
    assert!(model.penalty_weight() > 0.0);
}

#[test]
fn spin_transform_preserves_energy_end_to_end() {
    let (_, model) = four_security_instance();
    let ising = IsingModel::from_qubo(&model).unwrap();

    for state in 0..(1u64 << model.num_variables()) {
        let qubo = model.energy_for_basis(state);
        let spin = ising.energy_for_basis(state);
        assert!(
            (qubo - spin).abs() < 1e-8,
            "state {}: qubo {} vs spin {}",
            state,
            qubo,
            spin
        );
    }
}

#[test]
fn classical_and_variational_reports_match_recomputation() {
    let (params, model) = four_security_instance();

    let mut solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(ClassicalSolver::with_config(
            AnnealerConfig {
                num_reads: 20,
                sweeps: 200,
            },
            11,
        )),
        Box::new(VqeSolver::new(30, 11)),
    ];

    for solver in solvers.iter_mut() {
        let name = solver.name();
        let start = Instant::now();
        let outcome = solver.solve(&model).unwrap();
        let report = analyze(name, &outcome, &params, &model, start.elapsed()).unwrap();

        // The reported flag must equal direct recomputation, whether or not
        // the penalty was dominant enough to enforce the bound.
        let recomputed = outcome.solution.selected_count() as i64 <= params.max_selected;
        assert_eq!(report.constraint_satisfied, recomputed, "solver {}", name);
        assert_eq!(report.selected, outcome.solution.selected_count());
        assert!((report.qubo_energy - model.energy(outcome.solution.bits()).unwrap()).abs() < 1e-9);
    }
}

#[test]
fn variational_histories_stay_within_budget() {
    let (_, model) = four_security_instance();

    let budgets = [("vqe", 25usize), ("cvar", 20), ("qaoa", 20)];
    let mut solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(VqeSolver::new(25, 3)),
        Box::new(CvarVqeSolver::new(0.2, 20, 3)),
        Box::new(QaoaSolver::new(2, 20, 3)),
    ];

    for (solver, (name, budget)) in solvers.iter_mut().zip(budgets.iter()) {
        let outcome = solver.solve(&model).unwrap();
        assert!(
            !outcome.history.is_empty() && outcome.history.len() <= *budget,
            "{}: {} evaluations against budget {}",
            name,
            outcome.history.len(),
            budget
        );
        // Solutions decode one bit per variable
        assert_eq!(outcome.solution.bits().len(), model.num_variables());
    }
}
