//! Error types for flowcast-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the flowcast-io crate.
///
/// Covers missing files, read failures, malformed sequence rows and invalid
/// loader settings.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a failure of the underlying reader.
    #[error("read error: {reason}")]
    Read {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a row is empty or holds a token that is not a
    /// non-negative integer.
    #[error("format error on line {line}: {reason}")]
    Format {
        /// 1-based line number of the offending row.
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the input holds no rows at all.
    #[error("input contains no sequences")]
    EmptyInput,

    /// Returned when a loader setting is out of range.
    #[error("invalid loader configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read {
            reason: e.to_string(),
        }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        match e.position() {
            Some(pos) => IoError::Format {
                line: pos.line(),
                reason: e.to_string(),
            },
            None => IoError::Read {
                reason: e.to_string(),
            },
        }
    }
}
