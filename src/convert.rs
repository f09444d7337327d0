//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use flowcast_calendar::TicketPolicy;
use flowcast_evaluate::EvaluateConfig;
use flowcast_io::LoaderConfig;
use flowcast_markov::{Board, MarkovConfig};

/// Builds a [`LoaderConfig`] from the TOML I/O configuration.
pub fn build_loader_config(io: &IoToml) -> Result<LoaderConfig> {
    let cfg = LoaderConfig::new()
        .with_train_ratio(io.train_ratio)
        .with_shuffle(io.shuffle);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`MarkovConfig`] from the TOML model configuration.
pub fn build_markov_config(model: &ModelToml) -> Result<MarkovConfig> {
    let cfg = MarkovConfig::new()
        .with_row_sum_tolerance(model.row_sum_tolerance)
        .with_decimals(model.decimals);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`EvaluateConfig`]. The evaluation horizon is the forecast
/// horizon.
pub fn build_evaluate_config(eval: &EvaluateToml, days: u32) -> EvaluateConfig {
    EvaluateConfig::new()
        .with_days(days)
        .with_starting_state(eval.starting_state)
}

/// Builds the [`TicketPolicy`] for the `states` command.
pub fn build_ticket_policy(states: &StatesToml) -> TicketPolicy {
    if states.only_done {
        TicketPolicy::DoneOnly {
            status: states.done_status.clone(),
        }
    } else {
        TicketPolicy::IncludeAll
    }
}

/// Resolves the sample board for a model with `n_states` states.
///
/// Without an explicit board, 5 items sit in state 1.
pub fn build_board(board: Option<&[f64]>, n_states: usize) -> Result<Board> {
    match board {
        Some(values) => {
            if values.len() != n_states {
                bail!(
                    "board has {} states but the model has {n_states}",
                    values.len()
                );
            }
            Ok(Board::new(values.to_vec()))
        }
        None => {
            if n_states < 2 {
                bail!("default board needs at least 2 states, model has {n_states}");
            }
            let mut items = vec![0.0; n_states];
            items[1] = 5.0;
            Ok(Board::new(items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_config_rejects_bad_ratio() {
        let io = IoToml {
            train_ratio: 1.5,
            ..IoToml::default()
        };
        assert!(build_loader_config(&io).is_err());
    }

    #[test]
    fn markov_config_passes_values() {
        let model = ModelToml {
            row_sum_tolerance: 1e-6,
            decimals: 3,
        };
        let cfg = build_markov_config(&model).unwrap();
        assert_eq!(cfg.row_sum_tolerance(), 1e-6);
        assert_eq!(cfg.decimals(), 3);
    }

    #[test]
    fn evaluate_config_uses_forecast_days() {
        let cfg = build_evaluate_config(&EvaluateToml { starting_state: 0 }, 14);
        assert_eq!(cfg.days(), 14);
        assert_eq!(cfg.starting_state(), 0);
    }

    #[test]
    fn ticket_policy() {
        assert_eq!(
            build_ticket_policy(&StatesToml::default()),
            TicketPolicy::IncludeAll
        );
        let states = StatesToml {
            only_done: true,
            done_status: "Closed".to_string(),
        };
        assert_eq!(
            build_ticket_policy(&states),
            TicketPolicy::DoneOnly {
                status: "Closed".to_string()
            }
        );
    }

    #[test]
    fn default_board() {
        let board = build_board(None, 4).unwrap();
        assert_eq!(board.as_slice(), &[0.0, 5.0, 0.0, 0.0]);
        assert!(build_board(None, 1).is_err());
    }

    #[test]
    fn explicit_board_must_match_states() {
        assert!(build_board(Some(&[1.0, 2.0]), 3).is_err());
        let board = build_board(Some(&[1.0, 2.0, 0.0]), 3).unwrap();
        assert_eq!(board.total(), 3.0);
    }
}
