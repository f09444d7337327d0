//! Fitted workflow model: counts, transition matrix and fundamental matrix.

use tracing::info;

use crate::absorption::FundamentalMatrix;
use crate::config::MarkovConfig;
use crate::counts::TransitionCounts;
use crate::error::MarkovError;
use crate::state::StateSpace;
use crate::transition::TransitionMatrix;

/// A Markov model fitted to a training set of daily state sequences.
#[derive(Debug, Clone)]
pub struct MarkovModel {
    space: StateSpace,
    counts: TransitionCounts,
    matrix: TransitionMatrix,
    fundamental: FundamentalMatrix,
}

impl MarkovModel {
    /// Counts, normalizes and inverts in one pass.
    ///
    /// `space` is normally derived from all sequences of the run (training
    /// and testing) so that every state seen later has a row.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidConfig`] for a bad `config`,
    /// [`MarkovError::StateOutOfRange`] if a training sequence leaves
    /// `space`, [`MarkovError::NotStochastic`] if normalization drifts beyond
    /// the configured tolerance, and the fundamental-matrix errors of
    /// [`FundamentalMatrix::from_matrix`].
    pub fn fit<S: AsRef<[usize]>>(
        training: &[S],
        space: StateSpace,
        config: &MarkovConfig,
    ) -> Result<Self, MarkovError> {
        config.validate()?;
        let counts = TransitionCounts::from_sequences(training, &space)?;
        let matrix = TransitionMatrix::from_counts(&counts);
        matrix.validate(config.row_sum_tolerance())?;
        let fundamental = FundamentalMatrix::from_matrix(&matrix)?;

        info!(
            n_states = space.len(),
            n_transitions = counts.total(),
            n_absorbing = matrix.absorbing_states().len(),
            "model fitted"
        );
        Ok(Self {
            space,
            counts,
            matrix,
            fundamental,
        })
    }

    /// The state space of the model.
    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    /// Observed transition counts.
    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    /// Row-stochastic transition matrix.
    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Fundamental matrix of the transient block.
    pub fn fundamental(&self) -> &FundamentalMatrix {
        &self.fundamental
    }
}
