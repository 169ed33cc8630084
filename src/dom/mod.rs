//! DOM Module - Arena-based Document Tree
//!
//! Implements the in-memory representation used by the tree strategy:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element names

pub mod document;
pub mod node;
pub mod strings;

pub use document::{TreeBuilder, XmlDocument};
pub use node::{NodeId, NodeKind, XmlNode};
pub use strings::StringPool;
