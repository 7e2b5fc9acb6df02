//! Solver outputs: solutions and convergence histories

use qfolio_core::Variable;
use std::fmt;

/// A binary assignment, one bit per model variable
///
/// Produced once per solve as the terminal output and never mutated.
#[derive(Debug, Clone)]
pub struct Solution {
    variables: Vec<Variable>,
    bits: Vec<u8>,
}

impl Solution {
    /// Pair a variable list with its bits
    pub fn new(variables: Vec<Variable>, bits: Vec<u8>) -> Self {
        debug_assert_eq!(variables.len(), bits.len());
        Self { variables, bits }
    }

    /// Decode a basis-state integer against a variable list
    ///
    /// Bit `i` of `state` is the value of variable `i`.
    pub fn from_basis(variables: &[Variable], state: u64) -> Self {
        let bits = (0..variables.len())
            .map(|i| ((state >> i) & 1) as u8)
            .collect();
        Self {
            variables: variables.to_vec(),
            bits,
        }
    }

    /// The variable list, in model order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The assignment bits, in model order
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Value of one variable, if present
    pub fn value(&self, variable: Variable) -> Option<u8> {
        self.variables
            .iter()
            .position(|&v| v == variable)
            .map(|i| self.bits[i])
    }

    /// Bits of the decision variables only, in order
    pub fn decision_bits(&self) -> Vec<u8> {
        self.variables
            .iter()
            .zip(self.bits.iter())
            .filter(|(v, _)| v.is_decision())
            .map(|(_, &b)| b)
            .collect()
    }

    /// Number of selected securities (decision bits set to 1)
    pub fn selected_count(&self) -> usize {
        self.variables
            .iter()
            .zip(self.bits.iter())
            .filter(|(v, &b)| v.is_decision() && b == 1)
            .count()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (variable, bit)) in self.variables.iter().zip(self.bits.iter()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", variable, bit)?;
        }
        Ok(())
    }
}

/// One convergence-history record per cost evaluation
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Cost in the original QUBO energy scale
    pub cost: f64,
    /// Parameter vector the cost was evaluated at
    pub parameters: Vec<f64>,
}

/// Append-only record of a solve's cost evaluations
///
/// Owned exclusively by one solve invocation while in progress; returned
/// read-only to the caller for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceHistory {
    entries: Vec<HistoryEntry>,
}

impl ConvergenceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one evaluation record
    pub fn record(&mut self, cost: f64, parameters: &[f64]) {
        self.entries.push(HistoryEntry {
            cost,
            parameters: parameters.to_vec(),
        });
    }

    /// Number of recorded evaluations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The recorded cost sequence
    pub fn costs(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.cost).collect()
    }

    /// Lowest recorded cost
    pub fn best_cost(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.cost).fold(None, |best, c| {
            Some(best.map_or(c, |b: f64| b.min(c)))
        })
    }
}

/// Terminal output of one solve
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// The extracted assignment
    pub solution: Solution,
    /// Per-evaluation convergence record (empty for non-variational solvers)
    pub history: ConvergenceHistory,
}
