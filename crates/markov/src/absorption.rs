//! Fundamental matrix of an absorbing chain.
//!
//! With the transient states occupying the leading indices, the transition
//! matrix has the block form
//!
//! ```text
//!     P = | S  R |      S: transient -> transient
//!         | 0  I |      R: transient -> absorbing
//! ```
//!
//! and the fundamental matrix is `Q = (I - S)^-1`. `Q[i][j]` is the expected
//! number of days spent in transient state `j` when starting from `i`, so the
//! row sums of `Q` are the expected days until absorption.

use nalgebra::DMatrix;
use ndarray::{Array2, Axis, s};
use tracing::{debug, warn};

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// `(I - S)^-1` for the leading transient block `S` of a transition matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalMatrix {
    q: Array2<f64>,
}

impl FundamentalMatrix {
    /// Computes the fundamental matrix of `matrix`.
    ///
    /// The leading `n - n_absorbing` states are treated as the transient
    /// block. This requires states to be numbered in pipeline order with the
    /// absorbing states last; a warning is logged when they are not.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::AbsorptionUnreachable`] for the first leading
    /// state that has no path out of the transient block, and
    /// [`MarkovError::SingularMatrix`] if `I - S` still fails to invert.
    pub fn from_matrix(matrix: &TransitionMatrix) -> Result<Self, MarkovError> {
        let n = matrix.n_states();
        let absorbing = matrix.absorbing_states();
        let t = n - absorbing.len();

        if absorbing.iter().enumerate().any(|(k, &a)| a != t + k) {
            warn!(
                absorbing = ?absorbing,
                n_states = n,
                "absorbing states are not the trailing state indices"
            );
        }

        if t == 0 {
            return Ok(Self {
                q: Array2::zeros((0, 0)),
            });
        }

        if let Some(state) = first_unabsorbed(matrix, t) {
            return Err(MarkovError::AbsorptionUnreachable { state });
        }

        let s_block = matrix.probs().slice(s![..t, ..t]);
        let i_minus_s = DMatrix::from_fn(t, t, |i, j| {
            let identity = if i == j { 1.0 } else { 0.0 };
            identity - s_block[[i, j]]
        });
        let inverse = i_minus_s
            .try_inverse()
            .ok_or(MarkovError::SingularMatrix { size: t })?;
        let q = Array2::from_shape_fn((t, t), |(i, j)| inverse[(i, j)]);

        debug!(n_transient = t, "fundamental matrix computed");
        Ok(Self { q })
    }

    /// The `t x t` matrix `Q`.
    pub fn q(&self) -> &Array2<f64> {
        &self.q
    }

    /// Number of transient states covered by `Q`.
    pub fn transient_count(&self) -> usize {
        self.q.nrows()
    }

    /// Expected days before absorption from each transient state, including
    /// the current day (the row sums of `Q`).
    pub fn expected_days_to_absorption(&self) -> Vec<f64> {
        self.q.sum_axis(Axis(1)).to_vec()
    }
}

/// Returns the first state in `0..t` with no path to any state `>= t`.
fn first_unabsorbed(matrix: &TransitionMatrix, t: usize) -> Option<usize> {
    let n = matrix.n_states();
    let mut reaches_exit = vec![false; n];
    reaches_exit[t..].fill(true);

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..t {
            if reaches_exit[i] {
                continue;
            }
            if (0..n).any(|j| reaches_exit[j] && matrix.prob(i, j) > 0.0) {
                reaches_exit[i] = true;
                changed = true;
            }
        }
    }

    (0..t).find(|&i| !reaches_exit[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkovConfig;
    use crate::counts::TransitionCounts;
    use crate::state::StateSpace;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn matrix(probs: Array2<f64>) -> TransitionMatrix {
        TransitionMatrix::from_probs(probs, &MarkovConfig::new()).unwrap()
    }

    #[test]
    fn known_example() {
        let seqs = vec![vec![0, 0, 1], vec![0, 1, 1]];
        let space = StateSpace::from_sequences(&seqs).unwrap();
        let counts = TransitionCounts::from_sequences(&seqs, &space).unwrap();
        let tm = TransitionMatrix::from_counts(&counts);

        let fm = FundamentalMatrix::from_matrix(&tm).unwrap();
        assert_eq!(fm.transient_count(), 1);
        assert_relative_eq!(fm.q()[[0, 0]], 1.5, epsilon = 1e-12);
        assert_relative_eq!(fm.expected_days_to_absorption()[0], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn linear_pipeline() {
        // 0 -> 1 -> 2 (done), each transient state held with p = 0.5.
        let tm = matrix(array![[0.5, 0.5, 0.0], [0.0, 0.5, 0.5], [0.0, 0.0, 1.0]]);
        let fm = FundamentalMatrix::from_matrix(&tm).unwrap();
        let days = fm.expected_days_to_absorption();
        assert_relative_eq!(days[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(days[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(fm.q()[[0, 1]], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn all_absorbing_gives_empty_q() {
        let tm = matrix(array![[1.0, 0.0], [0.0, 1.0]]);
        let fm = FundamentalMatrix::from_matrix(&tm).unwrap();
        assert_eq!(fm.transient_count(), 0);
        assert!(fm.expected_days_to_absorption().is_empty());
    }

    #[test]
    fn closed_transient_loop_is_unreachable() {
        // States 1 and 2 cycle forever; state 3 is absorbing.
        let tm = matrix(array![
            [0.0, 0.5, 0.0, 0.5],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0]
        ]);
        assert_eq!(
            FundamentalMatrix::from_matrix(&tm),
            Err(MarkovError::AbsorptionUnreachable { state: 1 })
        );
    }

    #[test]
    fn absorbing_state_not_trailing() {
        // State 0 is absorbing but sits in the leading block.
        let tm = matrix(array![[1.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.0, 0.5, 0.5]]);
        assert_eq!(
            FundamentalMatrix::from_matrix(&tm),
            Err(MarkovError::AbsorptionUnreachable { state: 0 })
        );
    }

    #[test]
    fn q_times_i_minus_s_is_identity() {
        let tm = matrix(array![
            [0.2, 0.5, 0.2, 0.1],
            [0.1, 0.3, 0.4, 0.2],
            [0.0, 0.2, 0.3, 0.5],
            [0.0, 0.0, 0.0, 1.0]
        ]);
        let fm = FundamentalMatrix::from_matrix(&tm).unwrap();
        let t = fm.transient_count();
        let s_block = tm.probs().slice(s![..t, ..t]).to_owned();
        let i_minus_s = Array2::<f64>::eye(t) - &s_block;
        let product = fm.q().dot(&i_minus_s);
        for i in 0..t {
            for j in 0..t {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[[i, j]], expected, epsilon = 1e-10);
            }
        }
    }
}
