//! Reader for delimited daily state sequence files.
//!
//! One row per work item, one comma-separated non-negative integer per day,
//! no header:
//!
//! ```text
//! 0,0,0,1,1,2,3
//! 0,1,1,1,3
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::IoError;
use crate::sequence::StateSequence;

/// Reads every state sequence from the file at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Format`] for the first malformed row, and
/// [`IoError::EmptyInput`] if the file holds no rows. Nothing is returned
/// on failure.
pub fn read_sequences(path: &Path) -> Result<Vec<StateSequence>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), "reading state sequences");
    let file = File::open(path)?;
    let sequences = parse_sequences(file)?;
    info!(n_sequences = sequences.len(), "state sequences loaded");
    Ok(sequences)
}

/// Parses state sequences from any reader. See [`read_sequences`].
///
/// Blank (or whitespace-only) lines are rejected unless every line after
/// them is blank too.
pub fn parse_sequences<R: Read>(mut reader: R) -> Result<Vec<StateSequence>, IoError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let body = content_lines(&text)?.join("\n");

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut sequences = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record
            .position()
            .map_or(sequences.len() as u64 + 1, |p| p.line());
        sequences.push(parse_row(&record, line)?);
    }

    if sequences.is_empty() {
        return Err(IoError::EmptyInput);
    }
    let n_regressing = sequences.iter().filter(|s| !s.is_monotonic()).count();
    if n_regressing > 0 {
        debug!(n_regressing, "sequences that move back to an earlier state");
    }
    debug!(n_sequences = sequences.len(), "parsed state sequences");
    Ok(sequences)
}

/// Lines up to the last non-blank one.
///
/// A blank line followed by a non-blank one is an [`IoError::Format`] at
/// that (1-based) line.
fn content_lines(text: &str) -> Result<Vec<&str>, IoError> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(last) = lines.iter().rposition(|l| !l.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    let lines = &lines[..=last];
    if let Some(index) = lines.iter().position(|l| l.trim().is_empty()) {
        return Err(IoError::Format {
            line: index as u64 + 1,
            reason: "empty row".to_string(),
        });
    }
    Ok(lines.to_vec())
}

fn parse_row(record: &StringRecord, line: u64) -> Result<StateSequence, IoError> {
    if record.len() == 1 && record[0].is_empty() {
        return Err(IoError::Format {
            line,
            reason: "empty row".to_string(),
        });
    }

    let mut states = Vec::with_capacity(record.len());
    for (column, token) in record.iter().enumerate() {
        if token.is_empty() {
            return Err(IoError::Format {
                line,
                reason: format!("empty token in column {}", column + 1),
            });
        }
        let state = token.parse::<usize>().map_err(|_| IoError::Format {
            line,
            reason: format!("token {token:?} is not a non-negative integer"),
        })?;
        states.push(state);
    }

    StateSequence::new(states).ok_or_else(|| IoError::Format {
        line,
        reason: "empty row".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<StateSequence>, IoError> {
        parse_sequences(input.as_bytes())
    }

    #[test]
    fn parses_rows() {
        let seqs = parse("0,0,1\n0,1,1\n").unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].states(), &[0, 0, 1]);
        assert_eq!(seqs[1].states(), &[0, 1, 1]);
    }

    #[test]
    fn rows_may_differ_in_length() {
        let seqs = parse("0,1,2,3\n3\n0,0,0,0,0,3").unwrap();
        assert_eq!(seqs.iter().map(|s| s.len()).collect::<Vec<_>>(), vec![4, 1, 6]);
    }

    #[test]
    fn trims_whitespace_and_crlf() {
        let seqs = parse(" 0, 1 ,2\r\n1,2\r\n").unwrap();
        assert_eq!(seqs[0].states(), &[0, 1, 2]);
        assert_eq!(seqs[1].states(), &[1, 2]);
    }

    #[test]
    fn non_integer_token() {
        let err = parse("0,1\n0,x,2\n").unwrap_err();
        assert!(
            matches!(&err, IoError::Format { line: 2, reason } if reason.contains("\"x\"")),
            "got {err:?}"
        );
    }

    #[test]
    fn negative_token() {
        let err = parse("0,-1\n").unwrap_err();
        assert!(matches!(err, IoError::Format { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn empty_token() {
        let err = parse("0,,2\n").unwrap_err();
        assert!(
            matches!(&err, IoError::Format { line: 1, reason } if reason.contains("column 2")),
            "got {err:?}"
        );
    }

    #[test]
    fn blank_row_in_the_middle() {
        let err = parse("0,1\n\n1,2\n").unwrap_err();
        assert!(
            matches!(&err, IoError::Format { line: 2, reason } if reason == "empty row"),
            "got {err:?}"
        );
    }

    #[test]
    fn blank_crlf_row_in_the_middle() {
        let err = parse("0,1\r\n\r\n1,2\r\n").unwrap_err();
        assert!(
            matches!(&err, IoError::Format { line: 2, reason } if reason == "empty row"),
            "got {err:?}"
        );
    }

    #[test]
    fn leading_blank_row() {
        let err = parse("\n0,1\n").unwrap_err();
        assert!(
            matches!(&err, IoError::Format { line: 1, reason } if reason == "empty row"),
            "got {err:?}"
        );
    }

    #[test]
    fn trailing_blank_rows_are_allowed() {
        let seqs = parse("0,1\n1,2\n\n\r\n  \n").unwrap();
        assert_eq!(seqs.len(), 2);
    }

    #[test]
    fn line_numbers_follow_the_file() {
        let err = parse("0,1\n1,2\n2,x\n").unwrap_err();
        assert!(matches!(err, IoError::Format { line: 3, .. }), "got {err:?}");
    }

    #[test]
    fn regressing_sequences_are_kept() {
        let seqs = parse("0,2,1,3\n").unwrap();
        assert!(!seqs[0].is_monotonic());
    }

    #[test]
    fn whitespace_only_row() {
        let err = parse("0,1\n   \n1,2\n").unwrap_err();
        assert!(matches!(err, IoError::Format { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse(""), Err(IoError::EmptyInput)));
    }
}
