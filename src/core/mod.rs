//! Core XML scanning primitives
//!
//! This module contains the building blocks every strategy shares:
//! - Scanner: SIMD-accelerated byte cursor using memchr
//! - Entities: built-in and numeric reference decoding with Cow (zero-copy when possible)
//! - EventScanner: resumable, nesting-checked scanner feeding a ScanHandler

pub mod entities;
pub mod event_scanner;
pub mod scanner;

pub use event_scanner::{EventScanner, ScanHandler};
