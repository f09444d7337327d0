//! Error types for the flowcast-calendar crate.

/// Error type for all fallible operations in the flowcast-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a ticket has no state columns at all.
    #[error("no state entry dates given")]
    Empty,

    /// Returned when the first state has no entry date.
    #[error("first state has no entry date")]
    MissingStart,

    /// Returned when an entry date cannot be parsed.
    #[error("invalid entry date {value:?}: {reason}")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Returned when a ticket line has no final status field.
    #[error("ticket line has no final status")]
    MissingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty() {
        assert_eq!(
            CalendarError::Empty.to_string(),
            "no state entry dates given"
        );
    }

    #[test]
    fn error_missing_start() {
        assert_eq!(
            CalendarError::MissingStart.to_string(),
            "first state has no entry date"
        );
    }

    #[test]
    fn error_invalid_date() {
        let err = CalendarError::InvalidDate {
            value: "2019-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid entry date \"2019-13-01\": input is out of range"
        );
    }

    #[test]
    fn error_missing_status() {
        assert_eq!(
            CalendarError::MissingStatus.to_string(),
            "ticket line has no final status"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
