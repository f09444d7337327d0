//! Daily state sequence of one work item.

/// The workflow state a single work item occupied on each observed day.
///
/// Index `d` holds the state on day `d`. Always non-empty and read-only once
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSequence {
    states: Vec<usize>,
}

impl StateSequence {
    /// Wraps daily states. Returns `None` for an empty vector.
    pub fn new(states: Vec<usize>) -> Option<Self> {
        if states.is_empty() {
            None
        } else {
            Some(Self { states })
        }
    }

    /// The daily states.
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Number of observed days.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if there are no observed days (never for a loaded sequence).
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State on the last observed day.
    pub fn last_state(&self) -> usize {
        self.states[self.states.len() - 1]
    }

    /// First day on which the item was in `state` or any later state.
    pub fn first_day_at_or_after(&self, state: usize) -> Option<usize> {
        self.states.iter().position(|&s| s >= state)
    }

    /// State on `day`, or the last observed state if the sequence ends sooner.
    pub fn state_on_or_last(&self, day: usize) -> usize {
        self.states.get(day).copied().unwrap_or_else(|| self.last_state())
    }

    /// Returns `true` if the item never moved back to an earlier state.
    pub fn is_monotonic(&self) -> bool {
        self.states.windows(2).all(|w| w[0] <= w[1])
    }
}

impl AsRef<[usize]> for StateSequence {
    fn as_ref(&self) -> &[usize] {
        &self.states
    }
}
