//! Absorbing Markov chain model of work items moving through workflow states.
//!
//! Each work item is observed once per day; its daily state indices form a
//! sequence. This crate counts one-day transitions across those sequences,
//! normalizes them into a row-stochastic transition matrix, and answers
//! forecasting questions with it.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   counts     │────▶│  transition    │────▶│   absorption     │
//!  │ (tally pairs)│     │  (normalize P) │     │  (Q = (I-S)^-1)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//!                               │
//!                ┌──────────────┴─────────────┐
//!                ▼                            ▼
//!       ┌────────────────┐          ┌──────────────────┐
//!       │   forecast     │          │    simulate      │
//!       │ (board · P^n)  │          │ (Monte Carlo)    │
//!       └────────────────┘          └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use flowcast_markov::{Board, MarkovConfig, MarkovModel, StateSpace, forecast};
//!
//! let training = vec![vec![0, 0, 1], vec![0, 1, 1]];
//! let space = StateSpace::from_sequences(&training).unwrap();
//! let model = MarkovModel::fit(&training, space, &MarkovConfig::new()).unwrap();
//!
//! let days = model.fundamental().expected_days_to_absorption();
//! assert!((days[0] - 1.5).abs() < 1e-12);
//!
//! let board = Board::new(vec![3.0, 0.0]);
//! let later = forecast(&board, model.matrix(), 2).unwrap();
//! assert!((later.total() - 3.0).abs() < 1e-9);
//! ```

pub mod absorption;
pub mod config;
pub mod counts;
pub mod error;
pub mod forecast;
pub mod model;
pub mod simulate;
pub mod state;
pub mod transition;

pub use absorption::FundamentalMatrix;
pub use config::MarkovConfig;
pub use counts::TransitionCounts;
pub use error::MarkovError;
pub use forecast::{Board, forecast, matrix_power};
pub use model::MarkovModel;
pub use simulate::{
    MonteCarloEstimate, absorption_day_samples, days_until_absorbed, estimate_absorption_days,
    simulate_absorption_days,
};
pub use state::StateSpace;
pub use transition::TransitionMatrix;
