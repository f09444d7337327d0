//! Forecast command: project an ad-hoc board with a model trained on all input.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use flowcast_io::read_sequences;
use flowcast_markov::{MarkovModel, StateSpace, forecast};

use crate::cli::ForecastArgs;
use crate::config::FlowcastConfig;
use crate::convert;

/// Run the ad-hoc forecast.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    let mut config = FlowcastConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(days) = args.days {
        config.forecast.days = days;
    }
    if args.board.is_some() {
        config.forecast.board = args.board;
    }

    let input = config
        .io
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    info!(path = %input.display(), "reading state sequences");
    let sequences = read_sequences(input)
        .with_context(|| format!("failed to read sequences: {}", input.display()))?;

    let markov_cfg = convert::build_markov_config(&config.model)?;
    let space = StateSpace::from_sequences(&sequences).context("failed to derive state space")?;
    let model = MarkovModel::fit(&sequences, space, &markov_cfg).context("failed to fit model")?;

    let days = config.forecast.days;
    let board = convert::build_board(config.forecast.board.as_deref(), model.space().len())?;
    let predicted = forecast(&board, model.matrix(), days).context("forecast failed")?;

    println!("Board {:?} after {days} days:", board.as_slice());
    println!("  expected: {:?}", round_to(predicted.as_slice(), markov_cfg.decimals()));
    println!("  rounded:  {:?}", predicted.rounded().as_slice());
    Ok(())
}

fn round_to(values: &[f64], decimals: u32) -> Vec<f64> {
    let scale = 10f64.powi(decimals as i32);
    values.iter().map(|v| (v * scale).round() / scale).collect()
}
