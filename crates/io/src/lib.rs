//! # flowcast-io
//!
//! Load per-item daily workflow state sequences from delimited text files and
//! partition them into training and testing sets.

mod error;
mod reader;
mod sequence;
mod split;

pub use error::IoError;
pub use reader::{parse_sequences, read_sequences};
pub use sequence::StateSequence;
pub use split::{LoaderConfig, Split, split_sequences};
