//! Numerical tolerances for Markov model construction and reporting.

use crate::error::MarkovError;

/// Configuration for transition matrix checks and display rounding.
///
/// # Example
///
/// ```
/// use flowcast_markov::MarkovConfig;
///
/// let config = MarkovConfig::new()
///     .with_row_sum_tolerance(1e-6)
///     .with_decimals(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct MarkovConfig {
    row_sum_tolerance: f64,
    decimals: u32,
}

impl MarkovConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `row_sum_tolerance = 1e-9`, `decimals = 2`.
    pub fn new() -> Self {
        Self {
            row_sum_tolerance: 1e-9,
            decimals: 2,
        }
    }

    /// Sets the maximum allowed deviation of a row sum from 1.0.
    pub fn with_row_sum_tolerance(mut self, tolerance: f64) -> Self {
        self.row_sum_tolerance = tolerance;
        self
    }

    /// Sets the number of decimal places used when rounding matrices for display.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Returns the row-sum tolerance.
    pub fn row_sum_tolerance(&self) -> f64 {
        self.row_sum_tolerance
    }

    /// Returns the display precision.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Validates this configuration.
    ///
    /// The tolerance must be finite and positive; `decimals` must not exceed 15.
    pub fn validate(&self) -> Result<(), MarkovError> {
        if !self.row_sum_tolerance.is_finite() || self.row_sum_tolerance <= 0.0 {
            return Err(MarkovError::InvalidConfig {
                reason: format!(
                    "row_sum_tolerance must be finite and positive, got {}",
                    self.row_sum_tolerance
                ),
            });
        }
        if self.decimals > 15 {
            return Err(MarkovError::InvalidConfig {
                reason: format!("decimals must be at most 15, got {}", self.decimals),
            });
        }
        Ok(())
    }
}

impl Default for MarkovConfig {
    fn default() -> Self {
        Self::new()
    }
}
