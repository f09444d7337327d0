//! Board forecasting by matrix power.

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// Number of work items in each state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Board {
    items: Vec<f64>,
}

impl Board {
    /// Wraps per-state item counts.
    pub fn new(items: Vec<f64>) -> Self {
        Self { items }
    }

    /// An empty board of `n_states` states.
    pub fn zeros(n_states: usize) -> Self {
        Self {
            items: vec![0.0; n_states],
        }
    }

    /// Builds a board from integer item counts.
    pub fn from_counts(counts: &[usize]) -> Self {
        Self {
            items: counts.iter().map(|&c| c as f64).collect(),
        }
    }

    /// Number of states on the board.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the board has no states.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item count per state.
    pub fn as_slice(&self) -> &[f64] {
        &self.items
    }

    /// Total number of items on the board.
    pub fn total(&self) -> f64 {
        self.items.iter().sum()
    }

    /// Copy with every count rounded to a whole item.
    pub fn rounded(&self) -> Board {
        Board {
            items: self.items.iter().map(|v| v.round()).collect(),
        }
    }

    fn validate(&self, n_states: usize) -> Result<(), MarkovError> {
        if self.items.len() != n_states {
            return Err(MarkovError::DimensionMismatch {
                expected: n_states,
                got: self.items.len(),
            });
        }
        for (state, &value) in self.items.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(MarkovError::InvalidBoard { state, value });
            }
        }
        Ok(())
    }
}

/// Computes `matrix^days` by repeated squaring. `days = 0` gives the identity.
pub fn matrix_power(matrix: &TransitionMatrix, days: u32) -> Array2<f64> {
    let n = matrix.n_states();
    let mut result = Array2::<f64>::eye(n);
    let mut base = matrix.probs().clone();
    let mut exp = days;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.dot(&base);
        }
        exp >>= 1;
        if exp > 0 {
            base = base.dot(&base);
        }
    }
    result
}

/// Projects `board` forward by `days` days: `board · matrix^days`.
///
/// Because every power of a row-stochastic matrix is row-stochastic, the
/// projected board holds the same number of items as the input. With
/// `days = 0` the input board is returned unchanged.
///
/// # Errors
///
/// Returns [`MarkovError::DimensionMismatch`] if the board and matrix have
/// different state counts, and [`MarkovError::InvalidBoard`] if a count is
/// negative or non-finite.
pub fn forecast(
    board: &Board,
    matrix: &TransitionMatrix,
    days: u32,
) -> Result<Board, MarkovError> {
    board.validate(matrix.n_states())?;
    if days == 0 {
        return Ok(board.clone());
    }
    let power = matrix_power(matrix, days);
    let projected = Array1::from(board.items.clone()).dot(&power);
    Ok(Board::new(projected.to_vec()))
}
