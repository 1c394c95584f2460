//! HTML/XML character references.
//!
//! - [`EntityTable`]: immutable named-reference registry (restricted, base, full sets).
//! - [`escape()`]: text -> `&name;` / literal / `&#N;` output.
//! - [`unescape()`]: reference-encoded text -> decoded text, preserving anything that
//!   does not resolve.
//!
//! The free functions use the process-wide [`EntityTable::builtin`] table. Callers that
//! load their own sources call the same operations as methods on the table.

pub mod perf_fixtures;

mod error;
mod escape;
mod source;
mod table;
mod unescape;

use std::borrow::Cow;

pub use crate::error::{LoadError, UnknownCharset, UnknownReferenceSet};
pub use crate::escape::{CanEncode, Charset, OutputSettings};
pub use crate::table::{EntitySources, EntityTable, NamedReference, ReferenceSet};
pub use crate::unescape::{RawReference, ReferenceKind, scan_reference};

/// True iff `name` (e.g. `"lt"`, no `&`/`;`) is a known named reference.
pub fn is_named_entity(name: &str) -> bool {
    EntityTable::builtin().is_named_entity(name)
}

/// The character a named reference stands for (`"amp"` -> `'&'`).
pub fn character_by_name(name: &str) -> Option<char> {
    EntityTable::builtin().lookup(name)
}

pub fn escape<E>(text: &str, encoder: &E, mode: ReferenceSet) -> String
where
    E: CanEncode + ?Sized,
{
    EntityTable::builtin().escape(text, encoder, mode)
}

pub fn escape_with_settings(text: &str, settings: &OutputSettings) -> String {
    EntityTable::builtin().escape_with_settings(text, settings)
}

/// Lenient decoding: the trailing `;` is optional.
pub fn unescape(text: &str) -> Cow<'_, str> {
    EntityTable::builtin().unescape(text, false)
}

/// Decode with an explicit strictness; `strict` requires the trailing `;`.
pub fn unescape_with(text: &str, strict: bool) -> Cow<'_, str> {
    EntityTable::builtin().unescape(text, strict)
}
