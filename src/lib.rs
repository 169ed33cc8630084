//! isa-census - per-ontology `is_a` maxima over Gene Ontology OBO-XML
//!
//! Two strategies compute the same table:
//! - Streaming: chunked event scan feeding a small state machine (bounded memory)
//! - Tree: full arena document plus tree queries (reference result)
//!
//! ```no_run
//! use isa_census::{strategy, ExtractConfig};
//!
//! let extraction = strategy::streaming::extract_path("go_obo.xml", &ExtractConfig::default())?;
//! for (category, best) in extraction.table.iter() {
//!     println!("{category}: {} ({} is_a)", best.name, best.parent_count);
//! }
//! # Ok::<(), isa_census::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod extract;
pub mod memory;
pub mod reader;
pub mod report;
pub mod sax;
pub mod strategy;

pub use config::ExtractConfig;
pub use error::{Error, ParseError, Result};
pub use extract::{Category, CategoryBest, Extraction, MaximaTable, StreamingExtractor};
pub use strategy::Strategy;
