//! Flowcast evaluation: compare board forecasts against held-out sequences.
//!
//! Every held-out item is anchored on the first day it reached a starting
//! state. The board of those anchored items is projected forward with the
//! learned transition matrix and compared, state by state, with where the
//! items actually were after the horizon.

mod board;
mod config;
mod error;
mod output;
mod scoring;

use flowcast_io::StateSequence;
use flowcast_markov::{TransitionMatrix, forecast};
use tracing::{debug, info};

pub use board::{ObservedBoard, board_after_days};
pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use output::{ForecastEvaluation, to_json};
pub use scoring::{BoardErrors, score_boards};

/// Evaluate a forecast against held-out sequences.
///
/// # Errors
///
/// Returns [`EvaluateError::EmptyTestingSet`] if `testing` is empty,
/// [`EvaluateError::NoItemsReachStart`] if no sequence ever reaches the
/// starting state, and [`EvaluateError::Markov`] if a state lies outside the
/// matrix's state space.
pub fn evaluate_forecast(
    testing: &[StateSequence],
    matrix: &TransitionMatrix,
    config: &EvaluateConfig,
) -> Result<ForecastEvaluation, EvaluateError> {
    if testing.is_empty() {
        return Err(EvaluateError::EmptyTestingSet);
    }
    let n_states = matrix.n_states();
    let days = config.days();
    let starting_state = config.starting_state();

    // Step 1: Boards on the anchor day and after the horizon
    let initial = board_after_days(testing, n_states, 0, starting_state)?;
    let observed = board_after_days(testing, n_states, days as usize, starting_state)?;
    let n_items = testing.len() - initial.n_skipped;
    if n_items == 0 {
        return Err(EvaluateError::NoItemsReachStart { starting_state });
    }
    if initial.n_skipped > 0 {
        debug!(
            n_skipped = initial.n_skipped,
            starting_state, "sequences skipped during evaluation"
        );
    }

    // Step 2: Forecast the anchored board
    let predicted = forecast(&initial.board, matrix, days)?;
    let predicted_rounded = predicted.rounded();

    // Step 3: Score
    let errors = score_boards(&initial.board, &observed.board, &predicted_rounded);
    info!(
        days,
        n_items,
        model_error = errors.model,
        baseline_error = errors.baseline,
        "forecast evaluated"
    );

    Ok(ForecastEvaluation {
        days,
        starting_state,
        n_items,
        n_skipped: initial.n_skipped,
        initial: initial.board,
        observed: observed.board,
        predicted,
        predicted_rounded,
        model_error: errors.model,
        baseline_error: errors.baseline,
    })
}
