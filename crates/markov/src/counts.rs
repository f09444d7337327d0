//! Observed one-day transition counts.

use ndarray::{Array2, ArrayView1};
use tracing::debug;

use crate::error::MarkovError;
use crate::state::StateSpace;

/// Dense `n x n` table of observed one-day transitions.
///
/// `count(from, to)` is the number of times an item was in `from` on one day
/// and in `to` on the next. Self-transitions (an item staying put) are
/// counted like any other. Rows of states that never had a successor are
/// all zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionCounts {
    counts: Array2<u64>,
}

impl TransitionCounts {
    /// Counts the transitions of every adjacent day pair in `sequences`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateOutOfRange`] if a sequence visits a state
    /// outside `space`.
    pub fn from_sequences<S: AsRef<[usize]>>(
        sequences: &[S],
        space: &StateSpace,
    ) -> Result<Self, MarkovError> {
        let n = space.len();
        let mut counts = Array2::<u64>::zeros((n, n));

        for seq in sequences {
            let seq = seq.as_ref();
            // Single-day sequences have no pairs but must still fit the space.
            if let Some(&first) = seq.first() {
                space.check(first)?;
            }
            for pair in seq.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                space.check(from)?;
                space.check(to)?;
                counts[[from, to]] += 1;
            }
        }

        debug!(
            n_states = n,
            n_sequences = sequences.len(),
            n_transitions = counts.sum(),
            "transition counts built"
        );
        Ok(Self { counts })
    }

    /// Number of states covered by the table.
    pub fn n_states(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of observed transitions from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn count(&self, from: usize, to: usize) -> u64 {
        self.counts[[from, to]]
    }

    /// All outgoing counts of `from`.
    pub fn row(&self, from: usize) -> ArrayView1<'_, u64> {
        self.counts.row(from)
    }

    /// Total number of observed transitions leaving `from`.
    pub fn row_total(&self, from: usize) -> u64 {
        self.counts.row(from).sum()
    }

    /// Total number of observed transitions.
    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// Iterates over every `(from, to, count)` with a non-zero count, row by row.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.counts
            .indexed_iter()
            .filter(|&(_, &c)| c > 0)
            .map(|((from, to), &c)| (from, to, c))
    }
}
