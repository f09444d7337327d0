//! MAE-based scoring of a forecast against the observed board.

use flowcast_markov::Board;
use flowcast_stats::mean_absolute_error;

/// Model and baseline errors for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardErrors {
    /// MAE between the observed board and the rounded forecast.
    pub model: f64,
    /// MAE between the observed board and the unchanged initial board.
    pub baseline: f64,
}

/// Scores a forecast.
///
/// The baseline is the "nothing moves" forecast: it predicts that after the
/// horizon every item is still where it started.
pub fn score_boards(initial: &Board, observed: &Board, predicted_rounded: &Board) -> BoardErrors {
    BoardErrors {
        model: mean_absolute_error(observed.as_slice(), predicted_rounded.as_slice()),
        baseline: mean_absolute_error(initial.as_slice(), observed.as_slice()),
    }
}
