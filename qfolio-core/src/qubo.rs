//! Binary quadratic model construction
//!
//! Turns [`ProblemParameters`] into a QUBO: a quadratic factor-exposure
//! objective over decision bits `y[c]`, plus the inequality `Σ y_c ≤ N`
//! encoded through binary slack bits and a penalty term whose weight is
//! derived from the objective itself.

use crate::error::ModelError;
use crate::params::ProblemParameters;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A decision or slack variable
///
/// Decisions are the per-security selection bits; slacks encode the unsigned
/// integer that turns the selection inequality into an equality. Keeping the
/// two tagged (instead of flat string names) makes the decision/slack split
/// explicit everywhere a solution is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Selection bit for security `c`
    Decision(usize),
    /// Slack bit with weight `2^j`
    Slack(usize),
}

impl Variable {
    /// Whether this is a decision (selection) variable
    pub fn is_decision(self) -> bool {
        matches!(self, Variable::Decision(_))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Decision(c) => write!(f, "y[{}]", c),
            Variable::Slack(j) => write!(f, "s[{}]", j),
        }
    }
}

/// A binary quadratic model over an ordered variable list
///
/// Linear and quadratic coefficients are stored separately so a diagonal
/// term can never masquerade as a pair. Quadratic keys are canonicalized to
/// `(i, j)` with `i < j`; both maps are ordered so iteration (and therefore
/// every circuit built from this model) is deterministic.
///
/// The variable list order defines the canonical index used by the Ising
/// transform, the oracle's qubit numbering, and solution decoding.
#[derive(Debug, Clone)]
pub struct QuboModel {
    variables: Vec<Variable>,
    linear: BTreeMap<usize, f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
    penalty: f64,
}

impl QuboModel {
    /// Build the QUBO for a problem instance
    ///
    /// # Errors
    /// - [`ModelError::EmptyProblem`] if the instance has no securities
    /// - [`ModelError::InvalidBound`] if the selection bound is negative
    ///
    /// Both are rejected before any coefficient is produced.
    pub fn from_parameters(params: &ProblemParameters) -> Result<Self, ModelError> {
        let num_securities = params.num_securities();
        if num_securities == 0 {
            return Err(ModelError::EmptyProblem);
        }
        if params.max_selected < 0 {
            return Err(ModelError::InvalidBound {
                bound: params.max_selected,
            });
        }
        let bound = params.max_selected as u64;

        // Slack bits represent an unsigned integer in [0, 2^k - 1] with
        // k = ceil(log2(N + 1)).
        let num_slack = (u64::BITS - bound.leading_zeros()) as usize;

        let mut variables: Vec<Variable> =
            (0..num_securities).map(Variable::Decision).collect();
        variables.extend((0..num_slack).map(Variable::Slack));

        let mut model = Self {
            variables,
            linear: BTreeMap::new(),
            quadratic: BTreeMap::new(),
            offset: 0.0,
            penalty: 0.0,
        };

        // Factor objective: weight · (Σ_c loading_c · A_c · y_c − target)²
        for factor in &params.factors {
            let coeffs: Vec<f64> = factor
                .loadings
                .iter()
                .zip(params.weights.iter())
                .map(|(&beta, &a)| beta * a)
                .collect();
            model.add_squared_linear_form(&coeffs, factor.target, factor.weight);
        }

        // Penalty weight: twice the largest coefficient magnitude of the
        // unpenalized objective, so no single objective term can pay for a
        // constraint violation. Degenerate empty objectives fall back to 1.
        let max_abs = model.max_abs_coefficient();
        let penalty = if max_abs > 0.0 { 2.0 * max_abs } else { 1.0 };
        model.penalty = penalty;

        // Constraint: (Σ y_c + Σ 2^j·s_j − N)², expanded over the joint
        // variable space with weights 1 for decisions and 2^j for slacks.
        let mut joint = vec![1.0; num_securities];
        joint.extend((0..num_slack).map(|j| (1u64 << j) as f64));
        model.add_squared_linear_form(&joint, bound as f64, penalty);

        debug!(
            variables = model.num_variables(),
            slack_bits = num_slack,
            penalty,
            "QUBO model built"
        );

        Ok(model)
    }

    /// Expand `weight · (Σ_i coeffs_i · x_i − target)²` into the model
    ///
    /// Diagonal terms use `x² = x`; cross terms get twice the coefficient
    /// product; the constant lands in the offset.
    fn add_squared_linear_form(&mut self, coeffs: &[f64], target: f64, weight: f64) {
        for (i, &a) in coeffs.iter().enumerate() {
            self.add_linear(i, weight * (a * a - 2.0 * target * a));
            for (j, &b) in coeffs.iter().enumerate().skip(i + 1) {
                self.add_quadratic(i, j, weight * 2.0 * a * b);
            }
        }
        self.offset += weight * target * target;
    }

    fn add_linear(&mut self, index: usize, coeff: f64) {
        *self.linear.entry(index).or_insert(0.0) += coeff;
    }

    fn add_quadratic(&mut self, a: usize, b: usize, coeff: f64) {
        debug_assert_ne!(a, b, "diagonal terms belong in the linear map");
        let key = if a < b { (a, b) } else { (b, a) };
        *self.quadratic.entry(key).or_insert(0.0) += coeff;
    }

    /// The ordered variable list
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of variables (decision + slack)
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of decision variables
    pub fn num_decisions(&self) -> usize {
        self.variables.iter().filter(|v| v.is_decision()).count()
    }

    /// Linear coefficients, keyed by variable index
    pub fn linear(&self) -> &BTreeMap<usize, f64> {
        &self.linear
    }

    /// Quadratic coefficients, keyed by `(i, j)` with `i < j`
    pub fn quadratic(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.quadratic
    }

    /// Constant energy offset
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The derived penalty weight P
    pub fn penalty_weight(&self) -> f64 {
        self.penalty
    }

    /// Largest coefficient magnitude over linear and quadratic terms
    pub fn max_abs_coefficient(&self) -> f64 {
        self.linear
            .values()
            .chain(self.quadratic.values())
            .fold(0.0, |acc: f64, &c| acc.max(c.abs()))
    }

    /// Energy of a full binary assignment, one bit per variable
    ///
    /// # Errors
    /// Returns [`ModelError::AssignmentLength`] on a length mismatch.
    pub fn energy(&self, assignment: &[u8]) -> Result<f64, ModelError> {
        if assignment.len() != self.num_variables() {
            return Err(ModelError::AssignmentLength {
                expected: self.num_variables(),
                actual: assignment.len(),
            });
        }
        let mut energy = self.offset;
        for (&i, &c) in &self.linear {
            energy += c * f64::from(assignment[i]);
        }
        for (&(i, j), &c) in &self.quadratic {
            energy += c * f64::from(assignment[i]) * f64::from(assignment[j]);
        }
        Ok(energy)
    }

    /// Energy of a basis state encoded as an integer (bit `i` = variable `i`)
    ///
    /// Used to score measurement outcomes without materializing a bit vector.
    pub fn energy_for_basis(&self, state: u64) -> f64 {
        let bit = |i: usize| ((state >> i) & 1) as f64;
        let mut energy = self.offset;
        for (&i, &c) in &self.linear {
            energy += c * bit(i);
        }
        for (&(i, j), &c) in &self.quadratic {
            energy += c * bit(i) * bit(j);
        }
        energy
    }
}
