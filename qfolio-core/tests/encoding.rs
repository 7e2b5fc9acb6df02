//! Cross-module checks: generated instances encode into QUBOs whose spin
//! rewrite is energy-equivalent, with a penalty that dominates the
//! objective's coefficients.

use qfolio_core::{IsingModel, ProblemParameters, QuboModel, Variable};

#[test]
fn qubo_and_spin_energies_agree_on_generated_instances() {
    for seed in [1u64, 7, 42, 99] {
        let params = ProblemParameters::random(3, seed);
        let model = QuboModel::from_parameters(&params).unwrap();
        let ising = IsingModel::from_qubo(&model).unwrap();

        let n = model.num_variables();
        for state in 0..(1u64 << n) {
            let bits: Vec<u8> = (0..n).map(|i| ((state >> i) & 1) as u8).collect();
            let qubo = model.energy(&bits).unwrap();
            let spin = ising.energy_for_basis(state);
            assert!(
                (qubo - spin).abs() < 1e-8,
                "seed {}, state {}: {} vs {}",
                seed,
                state,
                qubo,
                spin
            );
        }
    }
}

#[test]
fn penalty_dominates_unpenalized_objective_for_generated_instances() {
    for seed in [2u64, 13, 42, 77, 101] {
        for size in [2usize, 4, 6] {
            let params = ProblemParameters::random(size, seed);
            let model = QuboModel::from_parameters(&params).unwrap();

            // Reconstruct the unpenalized objective's largest coefficient
            // magnitude directly from the parameters.
            let factor = &params.factors[0];
            let coeffs: Vec<f64> = factor
                .loadings
                .iter()
                .zip(params.weights.iter())
                .map(|(&beta, &a)| beta * a)
                .collect();
            let mut max_abs: f64 = 0.0;
            for (i, &a) in coeffs.iter().enumerate() {
                max_abs = max_abs.max((factor.weight * (a * a - 2.0 * factor.target * a)).abs());
                for &b in &coeffs[i + 1..] {
                    max_abs = max_abs.max((factor.weight * 2.0 * a * b).abs());
                }
            }

            assert!(
                model.penalty_weight() > max_abs,
                "seed {}, size {}: P = {} vs max |coeff| = {}",
                seed,
                size,
                model.penalty_weight(),
                max_abs
            );
        }
    }
}

#[test]
fn variable_order_is_decisions_then_slacks() {
    let params = ProblemParameters::random(5, 3);
    let model = QuboModel::from_parameters(&params).unwrap();

    let mut seen_slack = false;
    for variable in model.variables() {
        match variable {
            Variable::Decision(_) => assert!(!seen_slack, "decision after slack"),
            Variable::Slack(_) => seen_slack = true,
        }
    }
    assert!(seen_slack);
}
