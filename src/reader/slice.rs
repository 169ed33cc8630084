//! In-memory XML Reader
//!
//! Drives the event scanner over a complete byte slice in one call.

use crate::core::{EventScanner, ScanHandler};
use crate::error::ParseError;

/// Scan a complete document, dispatching events to `handler`
pub fn scan_slice<H: ScanHandler + ?Sized>(input: &[u8], handler: &mut H) -> Result<(), ParseError> {
    let mut scanner = EventScanner::new();
    scanner.scan(input, true, handler)?;
    scanner.finish()
}
