//! Error types
//!
//! Only source-level failures are represented here. Per-record problems are
//! local to the extraction engine (`extract::record::RecordError`) and to the
//! tree strategy (`strategy::tree::TermError`) and never reach the caller.

use std::io;

/// Fatal failure while reading the document structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {position}")]
pub struct ParseError {
    pub message: String,
    /// Absolute byte offset into the input
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

/// Failure of a whole extraction run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// The input is not a well-formed document.
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
