//! Monte Carlo estimation of days until absorption.

use serde::Serialize;
use tracing::debug;

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// Walks one item through the chain from `start` until it enters an
/// absorbing state and returns the number of days that took.
///
/// Returns 0 if `start` is already absorbing. There is no step cap: the
/// chain is assumed to be absorbed almost surely (which
/// [`crate::FundamentalMatrix::from_matrix`] checks for the transient block).
///
/// # Errors
///
/// Returns [`MarkovError::StateOutOfRange`] if `start` is not a state of
/// `matrix`.
pub fn days_until_absorbed(
    matrix: &TransitionMatrix,
    start: usize,
    rng: &mut impl rand::Rng,
) -> Result<u64, MarkovError> {
    check_start(matrix, start)?;
    let mut state = start;
    let mut days = 0u64;
    while !matrix.is_absorbing(state) {
        state = matrix.sample(state, rng);
        days += 1;
    }
    Ok(days)
}

/// Runs `runs` independent trajectories from `start` and returns each
/// trajectory's day count.
///
/// # Errors
///
/// Returns [`MarkovError::ZeroRuns`] if `runs == 0` and
/// [`MarkovError::StateOutOfRange`] if `start` is not a state of `matrix`.
pub fn absorption_day_samples(
    matrix: &TransitionMatrix,
    start: usize,
    runs: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<f64>, MarkovError> {
    if runs == 0 {
        return Err(MarkovError::ZeroRuns);
    }
    check_start(matrix, start)?;
    let mut samples = Vec::with_capacity(runs);
    for _ in 0..runs {
        samples.push(days_until_absorbed(matrix, start, rng)? as f64);
    }
    Ok(samples)
}

/// Summary of simulated days until absorption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloEstimate {
    pub runs: usize,
    pub start: usize,
    /// Mean days until absorption.
    pub mean: f64,
    /// Sample standard deviation of a single trajectory.
    pub sd: f64,
    /// Standard error of `mean`.
    pub standard_error: f64,
}

/// Simulates `runs` trajectories from `start` and summarizes their lengths.
///
/// # Errors
///
/// See [`absorption_day_samples`].
pub fn estimate_absorption_days(
    matrix: &TransitionMatrix,
    start: usize,
    runs: usize,
    rng: &mut impl rand::Rng,
) -> Result<MonteCarloEstimate, MarkovError> {
    let samples = absorption_day_samples(matrix, start, runs, rng)?;
    let estimate = MonteCarloEstimate {
        runs,
        start,
        mean: flowcast_stats::mean(&samples),
        sd: flowcast_stats::sd(&samples),
        standard_error: flowcast_stats::standard_error(&samples),
    };
    debug!(
        start,
        runs,
        mean = estimate.mean,
        standard_error = estimate.standard_error,
        "monte carlo absorption estimate"
    );
    Ok(estimate)
}

/// Mean days until absorption from `start` over `runs` simulated trajectories.
///
/// Converges to the corresponding row sum of the fundamental matrix as
/// `runs` grows.
///
/// # Errors
///
/// See [`absorption_day_samples`].
pub fn simulate_absorption_days(
    matrix: &TransitionMatrix,
    start: usize,
    runs: usize,
    rng: &mut impl rand::Rng,
) -> Result<f64, MarkovError> {
    estimate_absorption_days(matrix, start, runs, rng).map(|e| e.mean)
}

fn check_start(matrix: &TransitionMatrix, start: usize) -> Result<(), MarkovError> {
    if start >= matrix.n_states() {
        return Err(MarkovError::StateOutOfRange {
            state: start,
            n_states: matrix.n_states(),
        });
    }
    Ok(())
}
