//! Streaming Strategy
//!
//! One forward pass over the input in fixed-size chunks. Memory is bounded
//! by the chunk size, the largest single construct, element depth and one
//! record's scratch state; document size does not matter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::extract::{Extraction, StreamingExtractor};
use crate::reader::ChunkedReader;

/// Run the streaming engine over any reader
///
/// A parse or read failure aborts the pass; no partial table is returned.
pub fn extract<R: Read>(reader: R, config: &ExtractConfig) -> Result<Extraction> {
    let mut engine = StreamingExtractor::new(config);
    let mut chunks = ChunkedReader::with_capacity(reader, config.chunk_size);

    let scanned = chunks.drive(&mut engine)?;
    if chunks.capacity() > config.chunk_size {
        debug!(
            chunk_size = config.chunk_size,
            grown_to = chunks.capacity(),
            "buffer grew to hold a single construct"
        );
    }

    let extraction = engine.finish();
    info!(
        bytes = scanned,
        records = extraction.stats.records_seen,
        rejected = extraction.stats.records_rejected,
        "streaming pass complete"
    );
    Ok(extraction)
}

/// Open `path` and run the streaming engine over it
pub fn extract_path(path: impl AsRef<Path>, config: &ExtractConfig) -> Result<Extraction> {
    let path = path.as_ref();
    info!(path = %path.display(), chunk_size = config.chunk_size, "streaming pass");
    // ChunkedReader does its own buffering
    let file = File::open(path)?;
    extract(file, config)
}
