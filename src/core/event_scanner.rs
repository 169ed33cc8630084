//! Resumable Event Scanner with ScanHandler Trait
//!
//! Turns raw bytes into the three structural events the extractors need
//! (element open, character data, element close) and checks that elements
//! nest properly. Both the streaming engine and the tree builder are
//! `ScanHandler`s driven by this one scanner.
//!
//! The scanner is resumable: `scan` consumes every complete construct in the
//! buffer it is given and reports how many bytes it used. The caller keeps
//! the unconsumed tail, appends more input and calls `scan` again. Character
//! data at the end of a non-final buffer is emitted as far as it safely can
//! be, so one text value may reach the handler in several pieces.

use super::entities::{decode_text, pending_reference};
use super::scanner::{is_xml_whitespace, Scanner};
use crate::error::ParseError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Receiver for structural events
///
/// Names and text are only borrowed for the duration of the call.
pub trait ScanHandler {
    /// Called when an element opens, before any of its content
    fn start_element(&mut self, name: &str);

    /// Called for entity-decoded character data
    ///
    /// May be called several times in a row for one run of text.
    fn text(&mut self, text: &str);

    /// Called once per CDATA section with its verbatim content
    ///
    /// Handlers that do not care about section boundaries get it as text.
    fn cdata(&mut self, text: &str) {
        if !text.is_empty() {
            self.text(text);
        }
    }

    /// Called when an element closes; always matches the innermost open element
    fn end_element(&mut self, name: &str);
}

/// Outcome of scanning one construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The construct was consumed
    Done,
    /// The buffer ends before the construct does
    Incomplete,
}

/// Well-formedness-checking scanner state carried across buffers
#[derive(Debug, Default)]
pub struct EventScanner {
    /// Names of currently open elements, innermost last
    open: Vec<String>,
    /// Whether the root element has been opened
    seen_root: bool,
    /// Absolute offset of the next buffer's first byte
    offset: usize,
}

impl EventScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// Scan `input`, dispatching events to `handler`
    ///
    /// Returns the number of bytes consumed. Unless `is_final` is set, an
    /// incomplete trailing construct is left unconsumed. With `is_final` set,
    /// an incomplete construct is an error.
    pub fn scan<H: ScanHandler + ?Sized>(
        &mut self,
        input: &[u8],
        is_final: bool,
        handler: &mut H,
    ) -> Result<usize, ParseError> {
        let mut scanner = Scanner::new(input);

        // A UTF-8 byte order mark may precede the document
        if self.offset == 0 {
            if scanner.starts_with(UTF8_BOM) {
                scanner.advance(UTF8_BOM.len());
            } else if !is_final && !input.is_empty() && scanner.is_prefix_of(UTF8_BOM) {
                return Ok(0);
            }
        }

        while !scanner.is_eof() {
            let start = scanner.position();
            let step = if scanner.peek() == Some(b'<') {
                let step = self.scan_markup(&mut scanner, handler)?;
                if step == Step::Incomplete {
                    scanner.set_position(start);
                }
                step
            } else {
                self.scan_text(&mut scanner, is_final, handler)?
            };

            if step == Step::Incomplete {
                if is_final {
                    return Err(self.error("unexpected end of input inside markup", start));
                }
                break;
            }
        }

        let consumed = scanner.position();
        self.offset += consumed;
        Ok(consumed)
    }

    /// Check the end-of-document conditions once all input has been scanned
    pub fn finish(&self) -> Result<(), ParseError> {
        if let Some(name) = self.open.last() {
            return Err(ParseError::new(
                format!("unclosed element <{name}>"),
                self.offset,
            ));
        }
        if !self.seen_root {
            return Err(ParseError::new("no root element", self.offset));
        }
        Ok(())
    }

    fn error(&self, message: impl Into<String>, local: usize) -> ParseError {
        ParseError::new(message, self.offset + local)
    }

    /// Scan markup starting with '<'
    fn scan_markup<H: ScanHandler + ?Sized>(
        &mut self,
        scanner: &mut Scanner<'_>,
        handler: &mut H,
    ) -> Result<Step, ParseError> {
        let start = scanner.position();

        match scanner.peek_at(1) {
            None => Ok(Step::Incomplete),
            Some(b'/') => self.scan_end_tag(scanner, handler),
            Some(b'?') => {
                // Processing instruction or XML declaration: skipped
                match scanner.find_seq_from(start + 2, b"?>") {
                    Some(end) => {
                        scanner.set_position(end + 2);
                        Ok(Step::Done)
                    }
                    None => Ok(Step::Incomplete),
                }
            }
            Some(b'!') => {
                if scanner.starts_with(b"<!--") {
                    match scanner.find_seq_from(start + 4, b"-->") {
                        Some(end) => {
                            scanner.set_position(end + 3);
                            Ok(Step::Done)
                        }
                        None => Ok(Step::Incomplete),
                    }
                } else if scanner.starts_with(b"<![CDATA[") {
                    self.scan_cdata(scanner, handler)
                } else if scanner.starts_with(b"<!DOCTYPE") {
                    if self.seen_root {
                        return Err(self.error("DOCTYPE after root element", start));
                    }
                    match scanner.find_doctype_end() {
                        Some(end) => {
                            scanner.set_position(end + 1);
                            Ok(Step::Done)
                        }
                        None => Ok(Step::Incomplete),
                    }
                } else if scanner.is_prefix_of(b"<!--")
                    || scanner.is_prefix_of(b"<![CDATA[")
                    || scanner.is_prefix_of(b"<!DOCTYPE")
                {
                    Ok(Step::Incomplete)
                } else {
                    Err(self.error("invalid markup declaration", start))
                }
            }
            Some(_) => self.scan_start_tag(scanner, handler),
        }
    }

    /// Scan a start tag or self-closing tag; attributes are skipped
    fn scan_start_tag<H: ScanHandler + ?Sized>(
        &mut self,
        scanner: &mut Scanner<'_>,
        handler: &mut H,
    ) -> Result<Step, ParseError> {
        let start = scanner.position();
        let Some(end) = scanner.find_tag_end_quoted() else {
            return Ok(Step::Incomplete);
        };

        scanner.advance(1);
        let name = scanner
            .read_name()
            .ok_or_else(|| self.error("invalid element name", start + 1))?;
        match scanner.peek() {
            Some(b) if is_xml_whitespace(b) || b == b'/' || b == b'>' => {}
            _ => return Err(self.error("invalid element name", start + 1)),
        }
        let name = std::str::from_utf8(name)
            .map_err(|_| self.error("invalid UTF-8 in element name", start + 1))?;
        let self_closing = scanner.slice(start, end).last() == Some(&b'/');

        if self.open.is_empty() && self.seen_root {
            return Err(self.error("junk after document element", start));
        }
        self.seen_root = true;
        scanner.set_position(end + 1);

        handler.start_element(name);
        if self_closing {
            handler.end_element(name);
        } else {
            self.open.push(name.to_owned());
        }
        Ok(Step::Done)
    }

    /// Scan an end tag, checking it against the innermost open element
    fn scan_end_tag<H: ScanHandler + ?Sized>(
        &mut self,
        scanner: &mut Scanner<'_>,
        handler: &mut H,
    ) -> Result<Step, ParseError> {
        let start = scanner.position();
        let Some(end) = scanner.find_byte(b'>') else {
            return Ok(Step::Incomplete);
        };

        scanner.advance(2);
        let name = scanner
            .read_name()
            .ok_or_else(|| self.error("invalid end tag", start))?;
        let name_end = scanner.position();
        if !scanner.slice(name_end, end).iter().all(|&b| is_xml_whitespace(b)) {
            return Err(self.error("invalid end tag", start));
        }
        let name = std::str::from_utf8(name)
            .map_err(|_| self.error("invalid UTF-8 in element name", start + 2))?;

        match self.open.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(self.error(
                    format!("mismatched tag: expected </{open}>, found </{name}>"),
                    start,
                ))
            }
            None => return Err(self.error(format!("unexpected closing tag </{name}>"), start)),
        }

        scanner.set_position(end + 1);
        handler.end_element(name);
        Ok(Step::Done)
    }

    /// Scan a CDATA section; its content is delivered verbatim
    fn scan_cdata<H: ScanHandler + ?Sized>(
        &mut self,
        scanner: &mut Scanner<'_>,
        handler: &mut H,
    ) -> Result<Step, ParseError> {
        let start = scanner.position();
        let content_start = start + b"<![CDATA[".len();
        let Some(end) = scanner.find_seq_from(content_start, b"]]>") else {
            return Ok(Step::Incomplete);
        };
        if self.open.is_empty() {
            return Err(self.error("CDATA outside root element", start));
        }

        let content = std::str::from_utf8(scanner.slice(content_start, end))
            .map_err(|e| self.error("invalid UTF-8", content_start + e.valid_up_to()))?;
        scanner.set_position(end + 3);
        handler.cdata(content);
        Ok(Step::Done)
    }

    /// Scan character data up to the next '<'
    ///
    /// Without a '<' in a non-final buffer, everything up to an unterminated
    /// entity reference or a split UTF-8 sequence is emitted and the rest is
    /// left for the next call.
    fn scan_text<H: ScanHandler + ?Sized>(
        &mut self,
        scanner: &mut Scanner<'_>,
        is_final: bool,
        handler: &mut H,
    ) -> Result<Step, ParseError> {
        let start = scanner.position();
        let (end, step) = match scanner.find_byte(b'<') {
            Some(lt) => (lt, Step::Done),
            None if is_final => (start + scanner.remaining().len(), Step::Done),
            None => {
                let rest = scanner.remaining();
                let keep = pending_reference(rest).unwrap_or(rest.len());
                let keep = complete_utf8_prefix(&rest[..keep]);
                let step = if keep == rest.len() {
                    Step::Done
                } else {
                    Step::Incomplete
                };
                (start + keep, step)
            }
        };

        let raw = scanner.slice(start, end);
        scanner.set_position(end);
        self.emit_text(raw, start, handler)?;
        Ok(step)
    }

    fn emit_text<H: ScanHandler + ?Sized>(
        &self,
        raw: &[u8],
        start: usize,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        if raw.is_empty() {
            return Ok(());
        }
        if self.open.is_empty() {
            if raw.iter().all(|&b| is_xml_whitespace(b)) {
                return Ok(());
            }
            return Err(self.error("text outside root element", start));
        }

        let text = std::str::from_utf8(raw)
            .map_err(|e| self.error("invalid UTF-8", start + e.valid_up_to()))?;
        let decoded = decode_text(text).map_err(|(message, at)| self.error(message, start + at))?;
        handler.text(&decoded);
        Ok(())
    }
}

/// Length of the longest prefix that does not end inside a UTF-8 sequence
///
/// Invalid bytes are not trimmed here; they are reported once scanned.
fn complete_utf8_prefix(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        _ => bytes.len(),
    }
}
