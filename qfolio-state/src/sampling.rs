//! Multi-shot measurement sampling
//!
//! Sampling uses the alias method (Walker's algorithm) for O(1) draws after
//! O(n) setup over the state's probability distribution. Outcomes are
//! returned as an ordered sequence so downstream consumers can break
//! count ties by first occurrence.

use crate::error::{Result, StateError};
use crate::state_vector::StateVector;
use std::collections::HashMap;

/// Counts from multiple measurement shots
///
/// Remembers the order in which distinct outcomes were first seen, which
/// makes [`SamplingResult::modal_outcome`] deterministic under ties.
#[derive(Debug, Clone)]
pub struct SamplingResult {
    counts: HashMap<u64, usize>,
    first_seen: Vec<u64>,
    shots: usize,
}

impl SamplingResult {
    /// Build a result from an ordered sequence of outcomes
    pub fn from_outcomes(outcomes: &[u64]) -> Self {
        let mut counts = HashMap::new();
        let mut first_seen = Vec::new();
        for &outcome in outcomes {
            let entry = counts.entry(outcome).or_insert(0usize);
            if *entry == 0 {
                first_seen.push(outcome);
            }
            *entry += 1;
        }
        Self {
            counts,
            first_seen,
            shots: outcomes.len(),
        }
    }

    /// Total number of shots
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Count for a specific outcome
    pub fn count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Empirical probability of an outcome
    pub fn probability(&self, outcome: u64) -> f64 {
        self.count(outcome) as f64 / self.shots as f64
    }

    /// The most frequent outcome; ties go to the first-seen outcome
    pub fn modal_outcome(&self) -> Option<u64> {
        let mut best: Option<(u64, usize)> = None;
        for &outcome in &self.first_seen {
            let count = self.counts[&outcome];
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((outcome, count));
            }
        }
        best.map(|(outcome, _)| outcome)
    }

    /// Distinct outcomes sorted by count, descending
    pub fn sorted_outcomes(&self) -> Vec<(u64, usize)> {
        let mut outcomes: Vec<_> = self.first_seen.iter().map(|&o| (o, self.counts[&o])).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1));
        outcomes
    }
}

/// Draw `shots` measurement outcomes from a state
///
/// The random source is a closure producing uniform values in [0, 1), so
/// callers control seeding.
///
/// # Errors
/// Returns error for an empty state distribution.
pub fn sample_outcomes(
    state: &StateVector,
    shots: usize,
    rng: &mut dyn FnMut() -> f64,
) -> Result<Vec<u64>> {
    if shots == 0 {
        return Ok(Vec::new());
    }
    let table = AliasTable::new(&state.probabilities())?;
    Ok((0..shots).map(|_| table.sample(rng) as u64).collect())
}

/// Alias table for O(1) sampling from a discrete distribution
///
/// Walker, A. J. (1977). "An Efficient Method for Generating Discrete
/// Random Variables with General Distributions"
#[derive(Debug)]
pub struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build an alias table from a probability distribution (sums to ~1)
    ///
    /// # Errors
    /// Returns [`StateError::EmptyDistribution`] for an empty slice.
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        let n = probabilities.len();
        if n == 0 {
            return Err(StateError::EmptyDistribution);
        }

        let mut prob = vec![0.0; n];
        let mut alias = vec![0; n];

        let mut scaled: Vec<f64> = probabilities.iter().map(|&p| p * n as f64).collect();

        let mut small = Vec::new();
        let mut large = Vec::new();
        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while !small.is_empty() && !large.is_empty() {
            if let (Some(s), Some(l)) = (small.pop(), large.pop()) {
                prob[s] = scaled[s];
                alias[s] = l;

                scaled[l] = (scaled[l] + scaled[s]) - 1.0;
                if scaled[l] < 1.0 {
                    small.push(l);
                } else {
                    large.push(l);
                }
            }
        }

        // Leftovers are saturated buckets (floating-point slack)
        for l in large {
            prob[l] = 1.0;
        }
        for s in small {
            prob[s] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    /// Sample an index in O(1)
    pub fn sample(&self, rng: &mut dyn FnMut() -> f64) -> usize {
        let n = self.prob.len();
        let i = ((rng() * n as f64) as usize).min(n - 1);
        if rng() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}
