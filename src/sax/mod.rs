//! SAX (Simple API for XML) Module
//!
//! Owned event values and a collecting handler. The extraction engine does
//! not need these to run; they let a scan be recorded and replayed, and let
//! tests drive handlers with hand-split event sequences.
//!
//! ```text
//! EventScanner ---> EventCollector ---> Vec<SaxEvent> ---> replay ---> any ScanHandler
//! ```

pub mod collector;
pub mod events;

pub use collector::EventCollector;
pub use events::{replay, SaxEvent};
