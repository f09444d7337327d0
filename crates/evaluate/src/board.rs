//! Observed boards built from held-out sequences.

use flowcast_io::StateSequence;
use flowcast_markov::{Board, MarkovError};
use tracing::debug;

/// A board read off held-out sequences, plus how many items were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedBoard {
    /// Item count per state.
    pub board: Board,
    /// Sequences that never reached the starting state.
    pub n_skipped: usize,
}

/// Counts where each item is `days` days after it first reached
/// `starting_state` (or any later state).
///
/// An item whose sequence ends before the horizon counts at its last
/// recorded state. Items that never reach `starting_state` are skipped.
///
/// # Errors
///
/// Returns [`MarkovError::StateOutOfRange`] if `starting_state` or an
/// observed state is not below `n_states`.
pub fn board_after_days(
    sequences: &[StateSequence],
    n_states: usize,
    days: usize,
    starting_state: usize,
) -> Result<ObservedBoard, MarkovError> {
    if starting_state >= n_states {
        return Err(MarkovError::StateOutOfRange {
            state: starting_state,
            n_states,
        });
    }

    let mut counts = vec![0usize; n_states];
    let mut n_skipped = 0;
    for (item, seq) in sequences.iter().enumerate() {
        let Some(start) = seq.first_day_at_or_after(starting_state) else {
            debug!(item, starting_state, "sequence never reaches starting state");
            n_skipped += 1;
            continue;
        };
        let state = seq.state_on_or_last(start + days);
        if state >= n_states {
            return Err(MarkovError::StateOutOfRange { state, n_states });
        }
        counts[state] += 1;
    }

    Ok(ObservedBoard {
        board: Board::from_counts(&counts),
        n_skipped,
    })
}
