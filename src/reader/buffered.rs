//! Chunked XML Reader
//!
//! Reads XML from any source implementing Read trait in fixed-size chunks
//! and drives the event scanner over each chunk. Only one chunk plus the
//! unfinished tail of the previous one is ever held in memory.

use std::io::{self, Read};

use crate::core::{EventScanner, ScanHandler};
use crate::error::Result;

/// Buffer size for reading chunks
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Chunked reader feeding a resumable event scanner
pub struct ChunkedReader<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    pos: usize,
    end: usize,
    eof: bool,
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Create a reader whose chunks are at most `capacity` bytes
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        ChunkedReader {
            reader,
            buffer: vec![0u8; capacity.max(1)],
            pos: 0,
            end: 0,
            eof: false,
        }
    }

    /// Current buffer size; grows only when a single construct exceeds it
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Fill the buffer from the reader, returning false at end of input
    pub fn fill_buffer(&mut self) -> io::Result<bool> {
        if self.eof {
            return Ok(false);
        }

        // Compact: move the unconsumed tail to the start
        if self.pos > 0 {
            self.buffer.copy_within(self.pos..self.end, 0);
            self.end -= self.pos;
            self.pos = 0;
        }

        // A construct larger than the buffer: make room for it
        if self.end == self.buffer.len() {
            let grown = self.buffer.len() * 2;
            self.buffer.resize(grown, 0);
        }

        let read = loop {
            match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if read == 0 {
            self.eof = true;
            Ok(false)
        } else {
            self.end += read;
            Ok(true)
        }
    }

    /// Get current buffered data as a slice
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[self.pos..self.end]
    }

    /// Consume n bytes from the buffer
    pub fn consume(&mut self, n: usize) {
        self.pos += n.min(self.end - self.pos);
    }

    /// Scan the whole input, dispatching events to `handler`
    ///
    /// Returns the number of bytes scanned. Any I/O or parse failure aborts
    /// the pass.
    pub fn drive<H: ScanHandler + ?Sized>(&mut self, handler: &mut H) -> Result<usize> {
        let mut scanner = EventScanner::new();

        loop {
            let more = self.fill_buffer()?;
            let consumed = scanner.scan(self.buffered(), !more, handler)?;
            self.consume(consumed);
            if !more {
                break;
            }
        }

        scanner.finish()?;
        Ok(scanner.consumed())
    }
}

/// Read entire XML document from a Read source
pub fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}
