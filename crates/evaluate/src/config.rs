//! Evaluation configuration.

/// Configuration for the held-out forecast evaluation.
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    days: u32,
    starting_state: usize,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            days: 7,
            starting_state: 1,
        }
    }
}

impl EvaluateConfig {
    /// Creates a configuration with defaults: 7-day horizon, starting state 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the forecast horizon in days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Set the state that anchors each item's evaluation window.
    ///
    /// Use 0 to start every item at its first observed day.
    pub fn with_starting_state(mut self, state: usize) -> Self {
        self.starting_state = state;
        self
    }

    /// Returns the forecast horizon in days.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Returns the starting state.
    pub fn starting_state(&self) -> usize {
        self.starting_state
    }
}
