//! String Pool for the tree
//!
//! Element names repeat constantly in a vocabulary file (`term`, `is_a`,
//! `name`, ...) so they are interned once and shared by every node. Text
//! content is mostly unique and is appended without deduplication.
//!
//! All strings live in one buffer; an ID is an index into `entries`.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Byte span of one stored string: (offset_in_data, length)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringEntry(u32, u32);

/// Interning pool backing node names and text values
///
/// Memory layout:
/// - `entries`: span for each string ID
/// - `data`: one buffer holding every stored string
/// - `hash_index`: hash -> list of interned IDs (handles rare collisions)
#[derive(Debug)]
pub struct StringPool {
    entries: Vec<StringEntry>,
    data: String,
    hash_index: HashMap<u64, Vec<u32>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        // Entry 0 is reserved for the empty string
        pool.entries.push(StringEntry(0, 0));
        pool
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the existing ID if it is already stored
    pub fn intern(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);
        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == s {
                    return id;
                }
            }
        }

        let id = self.push(s);
        self.hash_index.entry(hash).or_default().push(id);
        id
    }

    /// ID of an already interned string
    pub fn lookup(&self, s: &str) -> Option<u32> {
        if s.is_empty() {
            return Some(0);
        }
        let ids = self.hash_index.get(&Self::compute_hash(s))?;
        ids.iter().copied().find(|&id| self.get(id) == s)
    }

    /// Store a string without looking for duplicates
    pub fn push(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }
        let offset = self.data.len() as u32;
        self.data.push_str(s);
        let id = self.entries.len() as u32;
        self.entries.push(StringEntry(offset, s.len() as u32));
        id
    }

    /// Resolve an ID; unknown IDs resolve to the empty string
    pub fn get(&self, id: u32) -> &str {
        match self.entries.get(id as usize) {
            Some(&StringEntry(offset, len)) => {
                let start = offset as usize;
                &self.data[start..start + len as usize]
            }
            None => "",
        }
    }

    /// Number of stored strings, excluding the reserved empty entry
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Bytes of string data held
    pub fn bytes_used(&self) -> usize {
        self.data.len()
    }
}
