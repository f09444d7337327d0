//! Workflow state space.

use tracing::warn;

use crate::error::MarkovError;

/// The set of workflow states `0..n_states` for one run.
///
/// States are numbered in pipeline order, so the last index is the
/// terminal ("done") state. A state inside the range that no sequence ever
/// visits is kept (it gets an empty transition row) but is reported by
/// [`StateSpace::unobserved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSpace {
    observed: Vec<bool>,
}

impl StateSpace {
    /// Creates a state space of `n_states` states, all marked as observed.
    pub fn new(n_states: usize) -> Self {
        Self {
            observed: vec![true; n_states],
        }
    }

    /// Derives the state space from every state index in `sequences`.
    ///
    /// The space spans `0..=max_index`. Indices in that range that never
    /// occur are logged as degenerate states.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::EmptyData`] if there are no states at all.
    pub fn from_sequences<S: AsRef<[usize]>>(sequences: &[S]) -> Result<Self, MarkovError> {
        let max = sequences
            .iter()
            .flat_map(|s| s.as_ref().iter().copied())
            .max()
            .ok_or(MarkovError::EmptyData)?;

        let mut observed = vec![false; max + 1];
        for seq in sequences {
            for &s in seq.as_ref() {
                observed[s] = true;
            }
        }

        let space = Self { observed };
        let unobserved = space.unobserved();
        if !unobserved.is_empty() {
            warn!(
                states = ?unobserved,
                "state space contains states never observed in any sequence"
            );
        }
        Ok(space)
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns `true` if the space has no states.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Returns `true` if `state` lies inside the space.
    pub fn contains(&self, state: usize) -> bool {
        state < self.len()
    }

    /// Returns `Ok(())` if `state` lies inside the space.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateOutOfRange`] otherwise.
    pub fn check(&self, state: usize) -> Result<(), MarkovError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(MarkovError::StateOutOfRange {
                state,
                n_states: self.len(),
            })
        }
    }

    /// States in the range that no sequence ever visited.
    pub fn unobserved(&self) -> Vec<usize> {
        self.observed
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| !seen)
            .map(|(i, _)| i)
            .collect()
    }
}
