use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "flowcast.toml";

/// Top-level flowcast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowcastConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Input and train/test split settings.
    #[serde(default)]
    pub io: IoToml,

    /// Transition matrix settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Sample board forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Monte Carlo settings.
    #[serde(default)]
    pub simulate: SimulateToml,

    /// Held-out evaluation settings.
    #[serde(default)]
    pub evaluate: EvaluateToml,

    /// Ticket export conversion settings.
    #[serde(default)]
    pub states: StatesToml,
}

impl FlowcastConfig {
    /// Loads the configuration.
    ///
    /// An explicitly given path must exist. Without one, `flowcast.toml` in
    /// the working directory is used if present, otherwise all defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,
    #[serde(default)]
    pub shuffle: bool,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            train_ratio: default_train_ratio(),
            shuffle: false,
        }
    }
}

fn default_train_ratio() -> f64 {
    0.7
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default = "default_row_sum_tolerance")]
    pub row_sum_tolerance: f64,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            row_sum_tolerance: default_row_sum_tolerance(),
            decimals: default_decimals(),
        }
    }
}

fn default_row_sum_tolerance() -> f64 {
    1e-9
}
fn default_decimals() -> u32 {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_days")]
    pub days: u32,
    /// Sample board; defaults to 5 items in state 1.
    #[serde(default)]
    pub board: Option<Vec<f64>>,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            days: default_days(),
            board: None,
        }
    }
}

fn default_days() -> u32 {
    7
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateToml {
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default)]
    pub start_state: usize,
}

impl Default for SimulateToml {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            start_state: 0,
        }
    }
}

fn default_runs() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateToml {
    #[serde(default = "default_starting_state")]
    pub starting_state: usize,
}

impl Default for EvaluateToml {
    fn default() -> Self {
        Self {
            starting_state: default_starting_state(),
        }
    }
}

fn default_starting_state() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatesToml {
    #[serde(default)]
    pub only_done: bool,
    #[serde(default = "default_done_status")]
    pub done_status: String,
}

impl Default for StatesToml {
    fn default() -> Self {
        Self {
            only_done: false,
            done_status: default_done_status(),
        }
    }
}

fn default_done_status() -> String {
    "Done".to_string()
}
