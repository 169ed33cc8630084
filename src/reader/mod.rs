//! XML Reader Module
//!
//! Ways of feeding bytes to the event scanner:
//! - ChunkedReader: bounded-memory chunks from any `io::Read` (streaming strategy)
//! - scan_slice: one complete in-memory buffer (tree strategy)

pub mod buffered;
pub mod slice;

pub use buffered::{read_all, ChunkedReader, DEFAULT_CHUNK_SIZE};
pub use slice::scan_slice;
