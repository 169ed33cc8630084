//! SIMD-accelerated byte cursor using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! The scanner only ever sees one buffer. Searches return `None` when the
//! delimiter is not in the buffer, which the event scanner treats as
//! "construct incomplete, wait for more input".

use memchr::{memchr, memmem};

/// Cursor over one input buffer
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Bytes from the cursor to the end of the buffer
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.remaining().starts_with(needle)
    }

    /// True when the rest of the buffer is a proper prefix of `needle`,
    /// i.e. more input could still turn it into `needle`.
    #[inline]
    pub fn is_prefix_of(&self, needle: &[u8]) -> bool {
        let rest = self.remaining();
        rest.len() < needle.len() && needle.starts_with(rest)
    }

    /// Find next occurrence of a byte at or after the cursor
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.remaining()).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence at or after `from`
    #[inline]
    pub fn find_seq_from(&self, from: usize, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[from..], needle).map(|i| from + i)
    }

    /// Find the `>` closing the tag at the cursor, skipping `>` inside
    /// quoted attribute values
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        for (i, &b) in self.remaining().iter().enumerate() {
            match b {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' if !in_single_quote && !in_double_quote => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    /// Find the `>` closing a DOCTYPE, skipping an internal `[...]` subset
    pub fn find_doctype_end(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, &b) in self.remaining().iter().enumerate() {
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    /// Read an XML name at the cursor, advancing past it
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        if !is_name_start_char(self.peek()?) {
            return None;
        }
        self.pos += 1;
        while self.pos < self.input.len() && is_name_char(self.input[self.pos]) {
            self.pos += 1;
        }
        Some(&self.input[start..self.pos])
    }
}

/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

#[inline]
pub fn is_name_char(b: u8) -> bool {
    is_name_start_char(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

#[inline]
pub fn is_xml_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_end_quoted() {
        let scanner = Scanner::new(b"<a attr=\">test\">content");
        assert_eq!(scanner.find_tag_end_quoted(), Some(15));
    }

    #[test]
    fn test_find_tag_end_missing() {
        let scanner = Scanner::new(b"<term attr=\"x>");
        assert_eq!(scanner.find_tag_end_quoted(), None);
    }

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new(b"is_a>");
        assert_eq!(scanner.read_name(), Some(b"is_a" as &[u8]));
        assert_eq!(scanner.position(), 4);
    }

    #[test]
    fn test_read_name_rejects_digit() {
        let mut scanner = Scanner::new(b"1term>");
        assert_eq!(scanner.read_name(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_is_prefix_of() {
        let mut scanner = Scanner::new(b"<!-");
        assert!(scanner.is_prefix_of(b"<!--"));
        scanner.advance(1);
        assert!(!scanner.is_prefix_of(b"<!--"));
    }

    #[test]
    fn test_doctype_end_skips_subset() {
        let scanner = Scanner::new(b"<!DOCTYPE obo [ <!ENTITY x \"y\"> ]>");
        assert_eq!(scanner.find_doctype_end(), Some(33));
    }
}
