//! Extraction Module
//!
//! The streaming single-pass extractor and the data it works on:
//! - record: per-record scratch state (TermAccumulator)
//! - table: per-category maxima (MaximaTable)
//! - engine: the open/text/close state machine (StreamingExtractor)

pub mod engine;
pub mod record;
pub mod table;

pub use engine::{extract_events, CurrentTag, EngineState, Extraction, RunStats, StreamingExtractor};
pub use record::{Field, RecordError, TermAccumulator};
pub use table::{Category, CategoryBest, MaximaTable};
