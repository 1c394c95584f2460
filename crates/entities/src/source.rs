//! Parser for the flat `name=value` entity lists the table is built from.
//!
//! Format:
//! - Blank lines and lines starting with `#` or `!` are ignored.
//! - Every other line is `name=value`; whitespace around either side is trimmed.
//! - `name` is an ASCII letter followed by ASCII alphanumerics.
//! - `value` is the codepoint in base 34 (`0-9`, then `a-x`, either case) and must be a
//!   Unicode scalar value.
//!
//! Any deviation fails the whole source.

use std::collections::HashSet;

use crate::error::LoadError;
use crate::table::{NamedReference, ReferenceSet};

const CODEPOINT_RADIX: u32 = 34;

/// Parse one source into its entries, in file order.
pub(crate) fn parse_references(
    set: ReferenceSet,
    text: &str,
) -> Result<Vec<NamedReference>, LoadError> {
    let mut refs = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let Some((name, value)) = trimmed.split_once('=') else {
            return Err(LoadError::MalformedLine { set, line });
        };
        let name = name.trim();
        let value = value.trim();

        if !is_valid_name(name) {
            return Err(LoadError::InvalidName {
                set,
                line,
                name: name.to_string(),
            });
        }
        let Some(ch) = decode_codepoint(value) else {
            return Err(LoadError::InvalidCodepoint {
                set,
                line,
                value: value.to_string(),
            });
        };
        if !seen.insert(name) {
            return Err(LoadError::DuplicateName {
                set,
                line,
                name: name.to_string(),
            });
        }
        refs.push(NamedReference {
            name: name.into(),
            ch,
        });
    }

    if refs.is_empty() {
        return Err(LoadError::EmptySource { set });
    }
    Ok(refs)
}

fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.first().is_some_and(u8::is_ascii_alphabetic)
        && bytes.iter().all(u8::is_ascii_alphanumeric)
}

fn decode_codepoint(value: &str) -> Option<char> {
    // `from_str_radix` tolerates a leading `+`; the format does not.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u32::from_str_radix(value, CODEPOINT_RADIX)
        .ok()
        .and_then(char::from_u32)
}
