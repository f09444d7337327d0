use approx::assert_relative_eq;
use flowcast_markov::{
    Board, MarkovConfig, MarkovModel, StateSpace, forecast, simulate_absorption_days,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generate synthetic daily state sequences for a 4-state pipeline.
///
/// Every item starts in state 0 and moves forward one state at a time with
/// a per-state daily advance probability, ending with the terminal state 3.
fn synthetic_sequences(n_items: usize, seed: u64) -> Vec<Vec<usize>> {
    use rand::Rng;
    let advance = [0.3, 0.5, 0.4];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sequences = Vec::with_capacity(n_items);
    for _ in 0..n_items {
        let mut state = 0;
        let mut seq = vec![state];
        while state < 3 {
            if rng.random_bool(advance[state]) {
                state += 1;
            }
            seq.push(state);
        }
        sequences.push(seq);
    }
    sequences
}

fn fit(sequences: &[Vec<usize>]) -> MarkovModel {
    let space = StateSpace::from_sequences(sequences).expect("state space");
    MarkovModel::fit(sequences, space, &MarkovConfig::new()).expect("fit failed")
}

// ---------------------------------------------------------------------------
// 1. known_end_to_end_example
// ---------------------------------------------------------------------------
#[test]
fn known_end_to_end_example() {
    let model = fit(&[vec![0, 0, 1], vec![0, 1, 1]]);

    assert_eq!(model.counts().count(0, 0), 1);
    assert_eq!(model.counts().count(0, 1), 2);
    assert_eq!(model.matrix().absorbing_states(), vec![1]);
    assert_relative_eq!(model.matrix().prob(0, 0), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(model.matrix().prob(0, 1), 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(model.fundamental().q().shape(), &[1, 1]);
    assert_relative_eq!(model.fundamental().q()[[0, 0]], 1.5, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// 2. learned_rows_are_stochastic
// ---------------------------------------------------------------------------
#[test]
fn learned_rows_are_stochastic() {
    let model = fit(&synthetic_sequences(500, 1));
    for row in model.matrix().probs().rows() {
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-9);
    }
    assert_eq!(model.matrix().absorbing_states(), vec![3]);
}

// ---------------------------------------------------------------------------
// 3. learned_probabilities_recover_generator
// ---------------------------------------------------------------------------
#[test]
fn learned_probabilities_recover_generator() {
    let model = fit(&synthetic_sequences(2000, 2));
    let tm = model.matrix();
    assert!((tm.prob(0, 1) - 0.3).abs() < 0.03, "p01 = {}", tm.prob(0, 1));
    assert!((tm.prob(1, 2) - 0.5).abs() < 0.03, "p12 = {}", tm.prob(1, 2));
    assert!((tm.prob(2, 3) - 0.4).abs() < 0.03, "p23 = {}", tm.prob(2, 3));
    // Items never move backwards or skip states.
    assert_eq!(tm.prob(2, 0), 0.0);
    assert_eq!(tm.prob(0, 2), 0.0);
}

// ---------------------------------------------------------------------------
// 4. forecast_preserves_board_total
// ---------------------------------------------------------------------------
#[test]
fn forecast_preserves_board_total() {
    let model = fit(&synthetic_sequences(300, 3));
    let board = Board::new(vec![0.0, 5.0, 2.0, 1.0]);
    for days in [0, 1, 7, 60] {
        let out = forecast(&board, model.matrix(), days).expect("forecast");
        assert_relative_eq!(out.total(), board.total(), epsilon = 1e-9);
    }
    assert_eq!(forecast(&board, model.matrix(), 0).unwrap(), board);
}

// ---------------------------------------------------------------------------
// 5. monte_carlo_converges_to_fundamental_matrix
// ---------------------------------------------------------------------------
#[test]
fn monte_carlo_converges_to_fundamental_matrix() {
    let model = fit(&synthetic_sequences(1000, 4));
    let exact = model.fundamental().expected_days_to_absorption()[0];

    let mut rng = StdRng::seed_from_u64(99);
    let coarse = simulate_absorption_days(model.matrix(), 0, 1_000, &mut rng).unwrap();
    let fine = simulate_absorption_days(model.matrix(), 0, 100_000, &mut rng).unwrap();

    // Expected ~7.8 days; sd of a single run is ~3.7 days.
    assert!(
        (coarse - exact).abs() < 0.1 * exact,
        "1000 runs: {coarse}, exact {exact}"
    );
    assert!(
        (fine - exact).abs() < 0.02 * exact,
        "100000 runs: {fine}, exact {exact}"
    );
}

// ---------------------------------------------------------------------------
// 6. simulation_from_done_is_immediate
// ---------------------------------------------------------------------------
#[test]
fn simulation_from_done_is_immediate() {
    let model = fit(&synthetic_sequences(100, 5));
    let mut rng = StdRng::seed_from_u64(0);
    let days = simulate_absorption_days(model.matrix(), 3, 10, &mut rng).unwrap();
    assert_eq!(days, 0.0);
}
