//! Error types for the flowcast-markov crate.

/// Error type for all fallible operations in the flowcast-markov crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkovError {
    /// Returned when no sequences were supplied to build a model from.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when a state index lies outside the state space.
    #[error("state {state} is outside the state space 0..{n_states}")]
    StateOutOfRange {
        /// The offending state index.
        state: usize,
        /// Number of states in the space.
        n_states: usize,
    },

    /// Returned when a board or matrix has the wrong number of states.
    #[error("dimension mismatch: expected {expected} states, got {got}")]
    DimensionMismatch {
        /// Expected number of states.
        expected: usize,
        /// Actual number of states.
        got: usize,
    },

    /// Returned when a board holds a negative or non-finite count.
    #[error("invalid board: state {state} holds {value} (must be finite and >= 0)")]
    InvalidBoard {
        /// State index of the bad entry.
        state: usize,
        /// The bad value.
        value: f64,
    },

    /// Returned when a transition matrix row is not a probability distribution.
    #[error("row {row} is not a probability distribution: {reason}")]
    NotStochastic {
        /// Row index.
        row: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a transient state has no path to any absorbing state,
    /// which makes `I - S` singular.
    #[error("absorption is unreachable from transient state {state}")]
    AbsorptionUnreachable {
        /// The transient state that never gets absorbed.
        state: usize,
    },

    /// Returned when `I - S` cannot be inverted numerically.
    #[error("fundamental matrix: ({size}x{size}) I - S is singular")]
    SingularMatrix {
        /// Size of the transient block.
        size: usize,
    },

    /// Returned when a Monte Carlo simulation is asked for zero runs.
    #[error("number of runs must be at least 1")]
    ZeroRuns,

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
