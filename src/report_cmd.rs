//! Report command: learn a model, forecast, simulate and evaluate.

use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, info_span, warn};

use flowcast_evaluate::{EvaluateError, ForecastEvaluation, evaluate_forecast, to_json};
use flowcast_io::{StateSequence, read_sequences, split_sequences};
use flowcast_markov::{
    Board, MarkovModel, MonteCarloEstimate, StateSpace, estimate_absorption_days, forecast,
};

use crate::cli::{OutputFormat, ReportArgs};
use crate::config::FlowcastConfig;
use crate::convert;

/// Everything the report command prints, in print order.
#[derive(Debug, Serialize)]
pub struct Report {
    pub model: ModelSummary,
    /// Transition matrix rounded to the configured number of decimals.
    pub matrix: Vec<Vec<f64>>,
    pub sample_forecast: SampleForecast,
    pub absorption: AbsorptionSummary,
    pub monte_carlo: MonteCarloEstimate,
    /// Missing when the held-out set is empty or never reaches the
    /// starting state.
    pub evaluation: Option<ForecastEvaluation>,
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub n_states: usize,
    pub n_sequences: usize,
    pub n_training: usize,
    pub n_testing: usize,
    pub n_transitions: u64,
    pub absorbing_states: Vec<usize>,
    pub unobserved_states: Vec<usize>,
    pub transitions: Vec<TransitionEntry>,
}

#[derive(Debug, Serialize)]
pub struct TransitionEntry {
    pub from: usize,
    pub to: usize,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct SampleForecast {
    pub days: u32,
    pub board: Board,
    pub predicted: Board,
    pub predicted_rounded: Board,
}

#[derive(Debug, Serialize)]
pub struct AbsorptionSummary {
    pub transient_states: Vec<usize>,
    /// Expected days until done, one per transient state.
    pub expected_days: Vec<f64>,
}

/// Seeded RNG, or one seeded from the OS when no seed is configured.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Run the report pipeline and print the result to stdout.
pub fn run(args: ReportArgs) -> Result<()> {
    let _cmd = info_span!("report").entered();

    // 1. Load TOML and apply CLI overrides
    let mut config = FlowcastConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(days) = args.days {
        config.forecast.days = days;
    }
    if let Some(runs) = args.runs {
        config.simulate.runs = runs;
    }

    // 2. Read sequences
    let input = config
        .io
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    info!(path = %input.display(), "reading state sequences");
    let sequences = read_sequences(input)
        .with_context(|| format!("failed to read sequences: {}", input.display()))?;

    // 3. Build and print the report
    let mut rng = seeded_rng(config.seed);
    let report = build_report(&config, sequences, &mut rng)?;
    let rendered = match args.format {
        OutputFormat::Text => render_text(&report)?,
        OutputFormat::Json => to_json(&report).context("failed to serialize report")?,
    };
    println!("{rendered}");
    Ok(())
}

/// Learns a model from `sequences` and assembles the full report.
pub fn build_report(
    config: &FlowcastConfig,
    sequences: Vec<StateSequence>,
    rng: &mut StdRng,
) -> Result<Report> {
    // Step 1: Build configs from TOML
    let loader_cfg = convert::build_loader_config(&config.io)?;
    let markov_cfg = convert::build_markov_config(&config.model)?;
    let eval_cfg = convert::build_evaluate_config(&config.evaluate, config.forecast.days);

    // Step 2: State space over every sequence, then split
    let space = StateSpace::from_sequences(&sequences).context("failed to derive state space")?;
    let unobserved_states = space.unobserved();
    let n_sequences = sequences.len();
    let split = split_sequences(sequences, &loader_cfg, rng)?;

    // Step 3: Learn the model from the training set
    info!(n_training = split.training.len(), "learning model");
    let model =
        MarkovModel::fit(&split.training, space, &markov_cfg).context("failed to fit model")?;
    let matrix = model.matrix();
    let n_states = matrix.n_states();

    // Step 4: Forecast the sample board
    let days = config.forecast.days;
    let board = convert::build_board(config.forecast.board.as_deref(), n_states)?;
    let predicted = forecast(&board, matrix, days).context("sample forecast failed")?;

    // Step 5: Monte Carlo
    let monte_carlo =
        estimate_absorption_days(matrix, config.simulate.start_state, config.simulate.runs, rng)
            .context("Monte Carlo simulation failed")?;

    // Step 6: Held-out evaluation
    let evaluation = match evaluate_forecast(&split.testing, matrix, &eval_cfg) {
        Ok(eval) => Some(eval),
        Err(e @ (EvaluateError::EmptyTestingSet | EvaluateError::NoItemsReachStart { .. })) => {
            warn!(error = %e, "skipping held-out evaluation");
            None
        }
        Err(e) => return Err(e).context("evaluation failed"),
    };

    Ok(Report {
        model: ModelSummary {
            n_states,
            n_sequences,
            n_training: split.training.len(),
            n_testing: split.testing.len(),
            n_transitions: model.counts().total(),
            absorbing_states: matrix.absorbing_states(),
            unobserved_states,
            transitions: model
                .counts()
                .nonzero()
                .map(|(from, to, count)| TransitionEntry { from, to, count })
                .collect(),
        },
        matrix: matrix
            .rounded(markov_cfg.decimals())
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect(),
        sample_forecast: SampleForecast {
            days,
            board,
            predicted_rounded: predicted.rounded(),
            predicted,
        },
        absorption: AbsorptionSummary {
            transient_states: (0..n_states).filter(|&s| !matrix.is_absorbing(s)).collect(),
            expected_days: model.fundamental().expected_days_to_absorption(),
        },
        monte_carlo,
        evaluation,
    })
}

/// Renders the report as console text.
pub fn render_text(report: &Report) -> Result<String> {
    let mut out = String::new();
    let m = &report.model;

    writeln!(
        out,
        "MODEL: {} states, {} sequences ({} training, {} testing), {} transitions",
        m.n_states, m.n_sequences, m.n_training, m.n_testing, m.n_transitions
    )?;
    writeln!(out, "  absorbing states: {:?}", m.absorbing_states)?;
    if !m.unobserved_states.is_empty() {
        writeln!(out, "  never observed: {:?}", m.unobserved_states)?;
    }
    for t in &m.transitions {
        writeln!(out, "  {} -> {}: {}", t.from, t.to, t.count)?;
    }

    writeln!(out)?;
    writeln!(out, "TRANSITION MATRIX:")?;
    for row in &report.matrix {
        writeln!(out, "  {}", format_values(row))?;
    }

    let f = &report.sample_forecast;
    writeln!(out)?;
    writeln!(
        out,
        "Board {} after {} days:",
        format_values(f.board.as_slice()),
        f.days
    )?;
    writeln!(out, "  {}", format_values(f.predicted_rounded.as_slice()))?;

    writeln!(out)?;
    writeln!(out, "Expected days until done:")?;
    for (state, days) in report
        .absorption
        .transient_states
        .iter()
        .zip(&report.absorption.expected_days)
    {
        writeln!(out, "  state {state}: {days:.2}")?;
    }

    let mc = &report.monte_carlo;
    writeln!(out)?;
    writeln!(out, "Monte Carlo with {} runs:", mc.runs)?;
    writeln!(
        out,
        "  average days from state {} until done: {:.2} (sd {:.2}, standard error {:.3})",
        mc.start, mc.mean, mc.sd, mc.standard_error
    )?;

    writeln!(out)?;
    match &report.evaluation {
        Some(e) => {
            writeln!(
                out,
                "Testing: {} items from state {} ({} skipped)",
                e.n_items, e.starting_state, e.n_skipped
            )?;
            writeln!(out, "  board at day 0:  {}", format_values(e.initial.as_slice()))?;
            writeln!(
                out,
                "  observed after {} days: {}",
                e.days,
                format_values(e.observed.as_slice())
            )?;
            writeln!(
                out,
                "  predicted after {} days: {}",
                e.days,
                format_values(e.predicted_rounded.as_slice())
            )?;
            writeln!(out, "  model error (MAE):    {:.4}", e.model_error)?;
            write!(out, "  baseline error (MAE): {:.4}", e.baseline_error)?;
        }
        None => write!(out, "Testing: skipped")?,
    }
    Ok(out)
}

/// Formats values as `[a, b, c]`.
fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(states: &[usize]) -> StateSequence {
        StateSequence::new(states.to_vec()).unwrap()
    }

    fn sequences() -> Vec<StateSequence> {
        (0..20)
            .map(|i| {
                let mut s = vec![0; 1 + i % 3];
                s.extend(vec![1; 1 + i % 4]);
                s.extend(vec![2; 1 + i % 2]);
                s.push(3);
                seq(&s)
            })
            .collect()
    }

    fn config() -> FlowcastConfig {
        let mut cfg: FlowcastConfig = toml::from_str("seed = 1").unwrap();
        cfg.simulate.runs = 200;
        cfg.forecast.days = 3;
        cfg
    }

    #[test]
    fn report_sections() {
        let mut rng = seeded_rng(Some(1));
        let report = build_report(&config(), sequences(), &mut rng).unwrap();

        assert_eq!(report.model.n_states, 4);
        assert_eq!(report.model.n_training, 14);
        assert_eq!(report.model.n_testing, 6);
        assert_eq!(report.model.absorbing_states, vec![3]);
        assert_eq!(report.matrix.len(), 4);
        assert_eq!(report.sample_forecast.board.as_slice(), &[0.0, 5.0, 0.0, 0.0]);
        assert!((report.sample_forecast.predicted.total() - 5.0).abs() < 1e-9);
        assert_eq!(report.absorption.transient_states, vec![0, 1, 2]);
        assert_eq!(report.absorption.expected_days.len(), 3);
        assert!(report.monte_carlo.mean > 0.0);
        assert_eq!(report.monte_carlo.runs, 200);

        let eval = report.evaluation.as_ref().unwrap();
        assert_eq!(eval.days, 3);
        assert_eq!(eval.n_items, 6);
    }

    #[test]
    fn report_is_reproducible_with_seed() {
        let a = build_report(&config(), sequences(), &mut seeded_rng(Some(5))).unwrap();
        let b = build_report(&config(), sequences(), &mut seeded_rng(Some(5))).unwrap();
        assert_eq!(a.monte_carlo, b.monte_carlo);
    }

    #[test]
    fn evaluation_skipped_without_testing_set() {
        let mut cfg = config();
        cfg.io.train_ratio = 1.0;
        let report = build_report(&cfg, sequences(), &mut seeded_rng(Some(1))).unwrap();
        assert!(report.evaluation.is_none());
        assert!(render_text(&report).unwrap().ends_with("Testing: skipped"));
    }

    #[test]
    fn text_and_json_render() {
        let report = build_report(&config(), sequences(), &mut seeded_rng(Some(1))).unwrap();
        let text = render_text(&report).unwrap();
        assert!(text.starts_with("MODEL: 4 states"));
        assert!(text.contains("TRANSITION MATRIX:"));
        assert!(text.contains("Board [0, 5, 0, 0] after 3 days:"));
        assert!(text.contains("baseline error (MAE)"));

        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"]["n_states"], 4);
        assert_eq!(
            value["sample_forecast"]["board"],
            serde_json::json!([0.0, 5.0, 0.0, 0.0])
        );
    }

    #[test]
    fn board_of_wrong_size_is_error() {
        let mut cfg = config();
        cfg.forecast.board = Some(vec![1.0, 2.0]);
        assert!(build_report(&cfg, sequences(), &mut seeded_rng(Some(1))).is_err());
    }
}
