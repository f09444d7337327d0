//! Evaluation error types.

use flowcast_markov::MarkovError;

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// The held-out testing set holds no sequences.
    #[error("testing set is empty")]
    EmptyTestingSet,

    /// No held-out sequence ever reaches the starting state.
    #[error("no testing sequence reaches starting state {starting_state}")]
    NoItemsReachStart { starting_state: usize },

    /// A forecasting step failed.
    #[error("model error: {0}")]
    Markov(#[from] MarkovError),

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
