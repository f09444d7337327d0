//! JSON output structures for evaluation results.

use crate::error::EvaluateError;
use flowcast_markov::Board;
use serde::Serialize;

/// Outcome of comparing a forecast against held-out sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEvaluation {
    /// Forecast horizon in days.
    pub days: u32,
    /// State each item's window is anchored on.
    pub starting_state: usize,
    /// Items evaluated (sequences that reached the starting state).
    pub n_items: usize,
    /// Sequences that never reached the starting state.
    pub n_skipped: usize,
    /// Board on each item's first day at or after the starting state.
    pub initial: Board,
    /// Board `days` days later, read from the sequences.
    pub observed: Board,
    /// Forecast of `initial` after `days` days.
    pub predicted: Board,
    /// `predicted` rounded to whole items.
    pub predicted_rounded: Board,
    /// MAE between `observed` and `predicted_rounded`.
    pub model_error: f64,
    /// MAE between `initial` and `observed`.
    pub baseline_error: f64,
}

impl ForecastEvaluation {
    /// Returns `true` if the model beats the "nothing moves" baseline.
    pub fn beats_baseline(&self) -> bool {
        self.model_error < self.baseline_error
    }
}

/// Serialize an evaluation to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`EvaluateError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize>(output: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(output).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ForecastEvaluation {
        ForecastEvaluation {
            days: 2,
            starting_state: 1,
            n_items: 1,
            n_skipped: 0,
            initial: Board::new(vec![0.0, 1.0, 0.0, 0.0]),
            observed: Board::new(vec![0.0, 0.0, 1.0, 0.0]),
            predicted: Board::new(vec![0.0, 0.25, 0.5, 0.25]),
            predicted_rounded: Board::new(vec![0.0, 0.0, 1.0, 0.0]),
            model_error: 0.0,
            baseline_error: 0.5,
        }
    }

    #[test]
    fn json_has_expected_fields() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["days"], 2);
        assert_eq!(value["starting_state"], 1);
        assert_eq!(value["observed"], serde_json::json!([0.0, 0.0, 1.0, 0.0]));
        assert_eq!(value["baseline_error"], 0.5);
    }

    #[test]
    fn beats_baseline() {
        let mut eval = sample();
        assert!(eval.beats_baseline());
        eval.model_error = 0.5;
        assert!(!eval.beats_baseline());
    }
}
