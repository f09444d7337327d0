//! Training/testing split of loaded sequences.

use rand::seq::SliceRandom;
use tracing::info;

use crate::error::IoError;
use crate::sequence::StateSequence;

/// Settings for splitting sequences into training and testing sets.
///
/// # Example
///
/// ```
/// use flowcast_io::LoaderConfig;
///
/// let config = LoaderConfig::new().with_train_ratio(0.8).with_shuffle(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    train_ratio: f64,
    shuffle: bool,
}

impl LoaderConfig {
    /// Defaults: `train_ratio = 0.7`, `shuffle = false` (file order kept).
    pub fn new() -> Self {
        Self {
            train_ratio: 0.7,
            shuffle: false,
        }
    }

    /// Sets the fraction of sequences used for training.
    pub fn with_train_ratio(mut self, ratio: f64) -> Self {
        self.train_ratio = ratio;
        self
    }

    /// Enables or disables shuffling before the split.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Returns the training fraction.
    pub fn train_ratio(&self) -> f64 {
        self.train_ratio
    }

    /// Returns whether sequences are shuffled before splitting.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Checks that `train_ratio` is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), IoError> {
        if !self.train_ratio.is_finite() || !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(IoError::InvalidConfig {
                reason: format!("train_ratio must be in [0, 1], got {}", self.train_ratio),
            });
        }
        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequences partitioned into a training set and a held-out testing set.
#[derive(Debug, Clone)]
pub struct Split {
    /// Sequences the model is learned from.
    pub training: Vec<StateSequence>,
    /// Held-out sequences used for evaluation.
    pub testing: Vec<StateSequence>,
}

/// Splits `sequences` so that the first `floor(train_ratio * n)` form the
/// training set and the rest the testing set.
///
/// With `shuffle` enabled, the order is randomized with `rng` first;
/// otherwise the input order is kept and `rng` is not used.
///
/// # Errors
///
/// Returns [`IoError::InvalidConfig`] if the ratio is invalid.
pub fn split_sequences(
    mut sequences: Vec<StateSequence>,
    config: &LoaderConfig,
    rng: &mut impl rand::Rng,
) -> Result<Split, IoError> {
    config.validate()?;
    if config.shuffle() {
        sequences.shuffle(rng);
    }
    let n_train = (config.train_ratio() * sequences.len() as f64).floor() as usize;
    let testing = sequences.split_off(n_train.min(sequences.len()));
    info!(
        n_training = sequences.len(),
        n_testing = testing.len(),
        shuffled = config.shuffle(),
        "sequences split"
    );
    Ok(Split {
        training: sequences,
        testing,
    })
}
