//! Extraction Strategies
//!
//! Two ways of computing the same table:
//! - Streaming: single pass over chunked events, bounded memory
//! - Tree: whole document in memory, then tree queries

pub mod streaming;
pub mod tree;

use std::fmt;
use std::path::Path;

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::extract::Extraction;

pub use tree::TermError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Streaming,
    Tree,
}

impl Strategy {
    /// Short label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Streaming => "SAX",
            Strategy::Tree => "DOM",
        }
    }

    pub fn run(self, path: impl AsRef<Path>, config: &ExtractConfig) -> Result<Extraction> {
        match self {
            Strategy::Streaming => streaming::extract_path(path, config),
            Strategy::Tree => tree::extract_path(path, config),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
