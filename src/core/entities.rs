//! XML Entity Decoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! There is no DTD processing, so any other named reference is an error.
//! Uses Cow for zero-copy when no entities are present.

use memchr::{memchr, memrchr};
use std::borrow::Cow;

/// A bad reference: message and byte offset of its `&` within the input
pub type EntityError = (&'static str, usize);

/// Decode character data that is already valid UTF-8
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &str) -> Result<Cow<'_, str>, EntityError> {
    if memchr(b'&', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_entities(input).map(Cow::Owned)
}

fn decode_entities(input: &str) -> Result<String, EntityError> {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp_offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + amp_offset;
        result.push_str(&input[pos..amp]);

        let semi = memchr(b';', &bytes[amp..])
            .map(|i| amp + i)
            .ok_or(("unterminated entity reference", amp))?;
        let decoded = decode_entity(&input[amp + 1..semi]).ok_or(("undefined entity", amp))?;
        result.push(decoded);
        pos = semi + 1;
    }
    result.push_str(&input[pos..]);

    Ok(result)
}

/// Decode a single reference body (between `&` and `;`)
fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric_entity(numeric);
    }
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = match entity.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => entity.parse::<u32>().ok()?,
    };
    if !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

/// Offset of a trailing reference that has no `;` yet
///
/// Character data cut at a buffer boundary must stop before such a
/// reference so the whole reference is decoded once more input arrives.
#[inline]
pub fn pending_reference(input: &[u8]) -> Option<usize> {
    let amp = memrchr(b'&', input)?;
    match memchr(b';', &input[amp..]) {
        Some(_) => None,
        None => Some(amp),
    }
}
