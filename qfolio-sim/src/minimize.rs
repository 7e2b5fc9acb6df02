//! Derivative-free minimization
//!
//! A Nelder–Mead simplex minimizer over an arbitrary cost function. No
//! gradient information is used, which suits cost surfaces evaluated through
//! sampling. The budget caps *cost evaluations* — every call to the supplied
//! closure counts against it — so a caller recording one history entry per
//! evaluation can never exceed the budget.

use crate::error::{Result, SolverError};
use tracing::trace;

/// Nelder–Mead coefficients and convergence tolerance
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Convergence tolerance on the simplex size
    pub tolerance: f64,
    /// Reflection coefficient
    pub alpha: f64,
    /// Expansion coefficient
    pub gamma: f64,
    /// Contraction coefficient
    pub rho: f64,
    /// Shrink coefficient
    pub sigma: f64,
    /// Relative perturbation used to seed the initial simplex
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a minimization run
#[derive(Debug, Clone)]
pub struct MinimizeOutcome {
    /// Best parameter vector found
    pub parameters: Vec<f64>,
    /// Cost at the best parameters
    pub cost: f64,
    /// Number of cost evaluations spent
    pub evaluations: usize,
    /// Whether the simplex converged before the budget ran out
    pub converged: bool,
}

/// Nelder–Mead simplex minimizer
///
/// Maintains a simplex of n+1 vertices and iteratively reflects, expands,
/// contracts, or shrinks it toward the minimum. Terminates when the simplex
/// size drops below the tolerance or the evaluation budget is exhausted,
/// whichever comes first.
#[derive(Debug, Default)]
pub struct NelderMead {
    config: NelderMeadConfig,
}

impl NelderMead {
    /// Create a minimizer with explicit configuration
    pub fn new(config: NelderMeadConfig) -> Self {
        Self { config }
    }

    /// Minimize `cost` starting from `initial`, spending at most
    /// `max_evaluations` cost evaluations
    ///
    /// # Errors
    /// - [`SolverError::ZeroIterationBudget`] for an empty budget
    /// - any error returned by the cost function aborts immediately
    pub fn minimize<F>(
        &self,
        mut cost: F,
        initial: &[f64],
        max_evaluations: usize,
    ) -> Result<MinimizeOutcome>
    where
        F: FnMut(&[f64]) -> Result<f64>,
    {
        if max_evaluations == 0 {
            return Err(SolverError::ZeroIterationBudget);
        }
        let n = initial.len();
        let mut evaluations = 0usize;

        // Seed the simplex and evaluate as many vertices as the budget allows
        let vertices = self.initial_simplex(initial);
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        let mut costs: Vec<f64> = Vec::with_capacity(n + 1);
        for vertex in vertices {
            if evaluations >= max_evaluations {
                break;
            }
            evaluations += 1;
            costs.push(cost(&vertex)?);
            simplex.push(vertex);
        }

        let mut converged = false;
        if n > 0 && simplex.len() == n + 1 {
            loop {
                order_by_cost(&mut simplex, &mut costs);

                if simplex_size(&simplex) < self.config.tolerance {
                    converged = true;
                    break;
                }
                if evaluations >= max_evaluations {
                    break;
                }

                let centroid = centroid_excluding_worst(&simplex);
                let worst = n;
                trace!(
                    evaluations,
                    best = costs[0],
                    worst = costs[worst],
                    "simplex step"
                );

                // Reflection
                let reflected = blend(&centroid, &simplex[worst], 1.0 + self.config.alpha, -self.config.alpha);
                evaluations += 1;
                let reflected_cost = cost(&reflected)?;

                if reflected_cost < costs[0] {
                    // Expansion
                    if evaluations >= max_evaluations {
                        simplex[worst] = reflected;
                        costs[worst] = reflected_cost;
                        break;
                    }
                    let expanded = blend(&centroid, &reflected, 1.0 - self.config.gamma, self.config.gamma);
                    evaluations += 1;
                    let expanded_cost = cost(&expanded)?;
                    if expanded_cost < reflected_cost {
                        simplex[worst] = expanded;
                        costs[worst] = expanded_cost;
                    } else {
                        simplex[worst] = reflected;
                        costs[worst] = reflected_cost;
                    }
                } else if reflected_cost < costs[worst - 1] {
                    simplex[worst] = reflected;
                    costs[worst] = reflected_cost;
                } else {
                    // Contraction, outside or inside of the reflected point
                    if evaluations >= max_evaluations {
                        break;
                    }
                    let contracted = if reflected_cost < costs[worst] {
                        blend(&centroid, &reflected, 1.0 - self.config.rho, self.config.rho)
                    } else {
                        blend(&centroid, &simplex[worst], 1.0 - self.config.rho, self.config.rho)
                    };
                    evaluations += 1;
                    let contracted_cost = cost(&contracted)?;

                    if contracted_cost < costs[worst].min(reflected_cost) {
                        simplex[worst] = contracted;
                        costs[worst] = contracted_cost;
                    } else {
                        // Shrink toward the best vertex, within budget
                        let best = simplex[0].clone();
                        for i in 1..simplex.len() {
                            if evaluations >= max_evaluations {
                                break;
                            }
                            let shrunk =
                                blend(&best, &simplex[i], 1.0 - self.config.sigma, self.config.sigma);
                            evaluations += 1;
                            costs[i] = cost(&shrunk)?;
                            simplex[i] = shrunk;
                        }
                    }
                }
            }
        }

        order_by_cost(&mut simplex, &mut costs);
        Ok(MinimizeOutcome {
            parameters: simplex[0].clone(),
            cost: costs[0],
            evaluations,
            converged,
        })
    }

    /// Perturb each dimension of the start point to form n+1 vertices
    fn initial_simplex(&self, initial: &[f64]) -> Vec<Vec<f64>> {
        let step = self.config.initial_step;
        let mut simplex = vec![initial.to_vec()];
        for i in 0..initial.len() {
            let mut vertex = initial.to_vec();
            vertex[i] += if vertex[i].abs() > 1e-10 {
                vertex[i] * step
            } else {
                step
            };
            simplex.push(vertex);
        }
        simplex
    }
}

/// `a·wa + b·wb`, element-wise
fn blend(a: &[f64], b: &[f64], wa: f64, wb: f64) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(&x, &y)| wa * x + wb * y).collect()
}

fn order_by_cost(simplex: &mut [Vec<f64>], costs: &mut [f64]) {
    let mut indices: Vec<usize> = (0..costs.len()).collect();
    indices.sort_by(|&a, &b| {
        costs[a]
            .partial_cmp(&costs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted_simplex: Vec<Vec<f64>> = indices.iter().map(|&i| simplex[i].clone()).collect();
    let sorted_costs: Vec<f64> = indices.iter().map(|&i| costs[i]).collect();
    for (dst, src) in simplex.iter_mut().zip(sorted_simplex) {
        *dst = src;
    }
    costs.copy_from_slice(&sorted_costs);
}

fn centroid_excluding_worst(simplex: &[Vec<f64>]) -> Vec<f64> {
    let n = simplex.len() - 1;
    let dim = simplex[0].len();
    let mut centroid = vec![0.0; dim];
    for vertex in &simplex[..n] {
        for (c, &v) in centroid.iter_mut().zip(vertex.iter()) {
            *c += v;
        }
    }
    for c in centroid.iter_mut() {
        *c /= n as f64;
    }
    centroid
}

/// Largest vertex distance from the simplex centroid
fn simplex_size(simplex: &[Vec<f64>]) -> f64 {
    let dim = simplex[0].len();
    let mut centroid = vec![0.0; dim];
    for vertex in simplex {
        for (c, &v) in centroid.iter_mut().zip(vertex.iter()) {
            *c += v;
        }
    }
    for c in centroid.iter_mut() {
        *c /= simplex.len() as f64;
    }

    simplex
        .iter()
        .map(|vertex| {
            vertex
                .iter()
                .zip(centroid.iter())
                .map(|(&v, &c)| (v - c) * (v - c))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimizes_shifted_quadratic() {
        let minimizer = NelderMead::default();
        let outcome = minimizer
            .minimize(
                |p| Ok((p[0] - 3.0).powi(2) + (p[1] + 1.0).powi(2)),
                &[0.0, 0.0],
                500,
            )
            .unwrap();

        assert!(outcome.cost < 1e-6, "cost = {}", outcome.cost);
        assert!((outcome.parameters[0] - 3.0).abs() < 1e-2);
        assert!((outcome.parameters[1] + 1.0).abs() < 1e-2);
        assert!(outcome.evaluations <= 500);
    }

    #[test]
    fn test_budget_is_a_hard_cap() {
        let mut calls = 0usize;
        let minimizer = NelderMead::default();
        let outcome = minimizer
            .minimize(
                |p| {
                    calls += 1;
                    Ok(p.iter().map(|x| x * x).sum())
                },
                &[1.0, 2.0, 3.0],
                7,
            )
            .unwrap();

        assert_eq!(calls, 7);
        assert_eq!(outcome.evaluations, 7);
        assert!(!outcome.converged);
    }

    #[test]
    fn test_budget_smaller_than_simplex() {
        let mut calls = 0usize;
        let minimizer = NelderMead::default();
        let outcome = minimizer
            .minimize(
                |p| {
                    calls += 1;
                    Ok(p[0] * p[0] + p[1] * p[1])
                },
                &[2.0, 2.0],
                2,
            )
            .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(outcome.evaluations, 2);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let minimizer = NelderMead::default();
        let result = minimizer.minimize(|p| Ok(p[0]), &[1.0], 0);
        assert!(matches!(result, Err(SolverError::ZeroIterationBudget)));
    }

    #[test]
    fn test_cost_error_aborts() {
        let minimizer = NelderMead::default();
        let result = minimizer.minimize(
            |_| {
                Err(SolverError::NumericalInstability {
                    evaluation: 0,
                    cost: f64::NAN,
                })
            },
            &[1.0, 1.0],
            100,
        );
        assert!(matches!(
            result,
            Err(SolverError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_convergence_flag() {
        let minimizer = NelderMead::default();
        let outcome = minimizer
            .minimize(|p| Ok(p[0] * p[0]), &[0.5], 10_000)
            .unwrap();
        assert!(outcome.converged);
        assert!(outcome.evaluations < 10_000);
    }
}
