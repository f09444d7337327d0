//! Row-stochastic transition matrix estimated from transition counts.

use ndarray::{Array2, ArrayView1};
use tracing::debug;

use crate::config::MarkovConfig;
use crate::counts::TransitionCounts;
use crate::error::MarkovError;

/// An `n x n` row-stochastic transition matrix.
///
/// Row `i` holds the probabilities of moving from state `i` to each state on
/// the next day. A state whose row is a pure self-loop (`p[i][i] == 1`) is
/// absorbing: once entered it is never left.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    probs: Array2<f64>,
}

impl TransitionMatrix {
    /// Normalizes transition counts into maximum-likelihood probabilities.
    ///
    /// Each row is divided by its total. A state with no outgoing
    /// observations becomes an absorbing self-loop.
    pub fn from_counts(counts: &TransitionCounts) -> Self {
        let n = counts.n_states();
        let mut probs = Array2::<f64>::zeros((n, n));
        let mut n_empty = 0usize;

        for y in 0..n {
            let total = counts.row_total(y);
            if total == 0 {
                probs[[y, y]] = 1.0;
                n_empty += 1;
                continue;
            }
            let total = total as f64;
            for (x, &c) in counts.row(y).iter().enumerate() {
                probs[[y, x]] = c as f64 / total;
            }
        }

        let matrix = Self { probs };
        debug!(
            n_states = n,
            n_without_successors = n_empty,
            n_absorbing = matrix.absorbing_states().len(),
            "transition matrix normalized"
        );
        matrix
    }

    /// Wraps an explicit probability matrix after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::DimensionMismatch`] if the matrix is not square
    /// and [`MarkovError::NotStochastic`] if a row is not a probability
    /// distribution within `config`'s tolerance.
    pub fn from_probs(probs: Array2<f64>, config: &MarkovConfig) -> Result<Self, MarkovError> {
        if probs.nrows() != probs.ncols() {
            return Err(MarkovError::DimensionMismatch {
                expected: probs.nrows(),
                got: probs.ncols(),
            });
        }
        let matrix = Self { probs };
        matrix.validate(config.row_sum_tolerance())?;
        Ok(matrix)
    }

    /// Number of states.
    pub fn n_states(&self) -> usize {
        self.probs.nrows()
    }

    /// The full probability matrix.
    pub fn probs(&self) -> &Array2<f64> {
        &self.probs
    }

    /// Transition probabilities out of `from`.
    pub fn row(&self, from: usize) -> ArrayView1<'_, f64> {
        self.probs.row(from)
    }

    /// Probability of moving from `from` to `to` in one day.
    pub fn prob(&self, from: usize, to: usize) -> f64 {
        self.probs[[from, to]]
    }

    /// Returns `true` if `state`'s row is a pure self-loop.
    pub fn is_absorbing(&self, state: usize) -> bool {
        self.probs[[state, state]] == 1.0
    }

    /// Indices of all absorbing states, ascending.
    pub fn absorbing_states(&self) -> Vec<usize> {
        (0..self.n_states())
            .filter(|&s| self.is_absorbing(s))
            .collect()
    }

    /// Number of non-absorbing states.
    pub fn transient_count(&self) -> usize {
        self.n_states() - self.absorbing_states().len()
    }

    /// Checks that every entry is finite and in `[0, 1]` and that every row
    /// sums to 1 within `tolerance`.
    pub fn validate(&self, tolerance: f64) -> Result<(), MarkovError> {
        for (i, row) in self.probs.rows().into_iter().enumerate() {
            let mut sum = 0.0;
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(MarkovError::NotStochastic {
                        row: i,
                        reason: format!("entry {j} is {p}"),
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > tolerance {
                return Err(MarkovError::NotStochastic {
                    row: i,
                    reason: format!("sums to {sum}"),
                });
            }
        }
        Ok(())
    }

    /// Copy of the matrix rounded to `decimals` places, for display.
    pub fn rounded(&self, decimals: u32) -> Array2<f64> {
        let scale = 10f64.powi(decimals as i32);
        self.probs.mapv(|p| (p * scale).round() / scale)
    }

    /// Samples the next state from `from` by inverse-CDF ("roulette wheel")
    /// sampling.
    ///
    /// Draws `r` uniformly from `[0, 1)` and returns the smallest state whose
    /// cumulative probability exceeds `r`. If rounding leaves the cumulative
    /// sum short of `r`, the last state with non-zero probability is returned.
    pub fn sample(&self, from: usize, rng: &mut impl rand::Rng) -> usize {
        let r: f64 = rng.random();
        let row = self.probs.row(from);
        let mut cumulative = 0.0;
        let mut fallback = from;
        for (to, &p) in row.iter().enumerate() {
            if p > 0.0 {
                fallback = to;
            }
            cumulative += p;
            if cumulative > r {
                return to;
            }
        }
        fallback
    }
}
