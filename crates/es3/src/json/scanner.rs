//! String- and escape-aware byte scanner shared by every JSON cleanup pass.
//!
//! Braces, brackets and commas only count when they appear outside a string
//! literal. A backslash inside a string escapes exactly the next byte.

use std::borrow::Cow;

/// Escape substituted for an unpaired UTF-16 surrogate.
const REPLACEMENT_ESCAPE: &str = "\\ufffd";

/// Tracks whether the scan position is inside a JSON string literal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringTracker {
    in_string: bool,
    escaped: bool,
}

impl StringTracker {
    /// Feed one byte; returns `true` if it is structural (outside any string).
    ///
    /// Quote characters that open or close a string are not structural.
    pub fn is_structural(&mut self, byte: u8) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
            return false;
        }
        if byte == b'"' {
            self.in_string = true;
            return false;
        }
        true
    }
}

/// Exclusive end offset of the first balanced top-level object in `data`.
///
/// Depth is counted from the start of `data`; the scan stops at the first
/// structural `}` that brings the depth back to zero. Returns `None` if that
/// never happens (no object, or the object is truncated).
pub fn first_object_end(data: &[u8]) -> Option<usize> {
    let mut tracker = StringTracker::default();
    let mut depth: isize = 0;
    for (i, &byte) in data.iter().enumerate() {
        if !tracker.is_structural(byte) {
            continue;
        }
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Remove commas that directly precede `}` or `]`, ignoring whitespace in
/// between. Commas inside string literals are kept.
pub fn strip_trailing_commas(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut tracker = StringTracker::default();
    for (i, &byte) in data.iter().enumerate() {
        if tracker.is_structural(byte) && byte == b',' && closes_next(&data[i + 1..]) {
            continue;
        }
        out.push(byte);
    }
    out
}

/// Rewrite `\uXXXX` escapes that name an unpaired UTF-16 surrogate to
/// `\ufffd`. Valid surrogate pairs and escapes outside strings are kept.
pub fn replace_lone_surrogates(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut flushed = 0;
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                in_string = !in_string;
                i += 1;
            }
            b'\\' if in_string => match unicode_escape(bytes, i) {
                Some(0xD800..=0xDBFF)
                    if matches!(unicode_escape(bytes, i + 6), Some(0xDC00..=0xDFFF)) =>
                {
                    i += 12;
                }
                Some(0xD800..=0xDFFF) => {
                    let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                    buf.push_str(&text[flushed..i]);
                    buf.push_str(REPLACEMENT_ESCAPE);
                    i += 6;
                    flushed = i;
                }
                _ => i += 2,
            },
            _ => i += 1,
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[flushed..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// The code unit of a `\uXXXX` escape starting at `at`, if there is one.
fn unicode_escape(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if !escape.starts_with(b"\\u") || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}

fn closes_next(rest: &[u8]) -> bool {
    matches!(
        rest.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'}' | b']')
    )
}
