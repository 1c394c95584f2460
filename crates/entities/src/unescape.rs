//! Reference-encoded text -> decoded text.
//!
//! Scans left to right for non-overlapping matches of:
//!
//! ```text
//! & ( # (x|X)? HEXDIGIT+    numeric (hex when the x is present, else decimal)
//!   | LETTER ALNUM*         named
//!   ) (;)?
//! ```
//!
//! The trailing `;` is required in strict mode and optional otherwise. The `x` is only
//! taken when a hex digit follows it. A decimal body is still the maximal hex-digit run,
//! so `&#12ab;` is one match that fails to parse.
//!
//! Resolution policy:
//! - Numeric values that overflow, are surrogates, or exceed U+10FFFF are rejected.
//! - Unknown names are rejected.
//! - A rejected match is copied to the output verbatim; nothing is dropped or replaced.

use std::borrow::Cow;
use std::ops::Range;

use memchr::memchr;

use crate::table::EntityTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Decimal,
    Hex,
    Named,
}

/// One grammar match, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawReference {
    pub kind: ReferenceKind,
    /// Whole match, `&` through the optional `;`.
    pub span: Range<usize>,
    /// Digits or name only.
    pub body: Range<usize>,
}

impl RawReference {
    pub fn terminated(&self, text: &str) -> bool {
        self.body.end < self.span.end && text.as_bytes()[self.body.end] == b';'
    }
}

/// Match the reference grammar at byte offset `at`, which must hold `&`.
///
/// Returns `None` when `at` is not the start of a reference (a lone `&`, `&#;`, a
/// missing `;` in strict mode, ...).
pub fn scan_reference(text: &str, at: usize, strict: bool) -> Option<RawReference> {
    let bytes = text.as_bytes();
    if bytes.get(at) != Some(&b'&') {
        return None;
    }

    let mut i = at + 1;
    let kind;
    let body_start;
    match bytes.get(i) {
        Some(b'#') => {
            i += 1;
            let hex_marker = matches!(bytes.get(i), Some(b'x' | b'X'))
                && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit);
            if hex_marker {
                kind = ReferenceKind::Hex;
                i += 1;
            } else {
                kind = ReferenceKind::Decimal;
            }
            body_start = i;
            while bytes.get(i).is_some_and(u8::is_ascii_hexdigit) {
                i += 1;
            }
            if i == body_start {
                return None;
            }
        }
        Some(b) if b.is_ascii_alphabetic() => {
            kind = ReferenceKind::Named;
            body_start = i;
            i += 1;
            while bytes.get(i).is_some_and(u8::is_ascii_alphanumeric) {
                i += 1;
            }
        }
        _ => return None,
    }

    let body = body_start..i;
    let end = if bytes.get(i) == Some(&b';') {
        i + 1
    } else if strict {
        return None;
    } else {
        i
    };

    Some(RawReference {
        kind,
        span: at..end,
        body,
    })
}

impl EntityTable {
    /// Decode every resolvable reference in `text`.
    ///
    /// Borrows `text` when nothing was replaced, including the no-`&` fast path.
    pub fn unescape<'a>(&self, text: &'a str, strict: bool) -> Cow<'a, str> {
        let bytes = text.as_bytes();
        let Some(first) = memchr(b'&', bytes) else {
            return Cow::Borrowed(text);
        };

        let mut out: Option<String> = None;
        let mut copy_start = 0;
        let mut i = first;

        loop {
            match scan_reference(text, i, strict) {
                Some(raw) => {
                    if let Some(ch) = self.resolve(text, &raw) {
                        let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                        buf.push_str(&text[copy_start..raw.span.start]);
                        buf.push(ch);
                        copy_start = raw.span.end;
                    } else {
                        log::trace!(
                            target: "entities.unescape",
                            "unresolved {:?} reference {:?} at {}",
                            raw.kind,
                            &text[raw.span.clone()],
                            raw.span.start
                        );
                    }
                    i = raw.span.end;
                }
                None => i += 1,
            }

            match memchr(b'&', &bytes[i..]) {
                Some(rel) => i += rel,
                None => break,
            }
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&text[copy_start..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(text),
        }
    }

    fn resolve(&self, text: &str, raw: &RawReference) -> Option<char> {
        let body = &text[raw.body.clone()];
        match raw.kind {
            ReferenceKind::Named => self.lookup(body),
            ReferenceKind::Decimal => parse_scalar(body, 10),
            ReferenceKind::Hex => parse_scalar(body, 16),
        }
    }
}

fn parse_scalar(digits: &str, radix: u32) -> Option<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}
