//! Errors raised while building the entity table or parsing configuration labels.
//!
//! Escaping and unescaping are total and never produce these; malformed references
//! in caller text are preserved verbatim instead.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::table::ReferenceSet;

/// Failure to build an [`EntityTable`](crate::EntityTable) from its backing data.
///
/// A table that fails to load is never partially exposed.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    MalformedLine {
        set: ReferenceSet,
        line: usize,
    },
    InvalidName {
        set: ReferenceSet,
        line: usize,
        name: String,
    },
    InvalidCodepoint {
        set: ReferenceSet,
        line: usize,
        value: String,
    },
    DuplicateName {
        set: ReferenceSet,
        line: usize,
        name: String,
    },
    EmptySource {
        set: ReferenceSet,
    },
    /// A restricted/base entry whose codepoint has no name in the full set.
    MissingFromFull {
        set: ReferenceSet,
        name: String,
        ch: char,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read entity source {}: {source}", path.display())
            }
            LoadError::MalformedLine { set, line } => {
                write!(f, "{set} entities line {line}: expected `name=value`")
            }
            LoadError::InvalidName { set, line, name } => {
                write!(f, "{set} entities line {line}: invalid name {name:?}")
            }
            LoadError::InvalidCodepoint { set, line, value } => {
                write!(f, "{set} entities line {line}: invalid codepoint {value:?}")
            }
            LoadError::DuplicateName { set, line, name } => {
                write!(f, "{set} entities line {line}: duplicate name {name:?}")
            }
            LoadError::EmptySource { set } => write!(f, "{set} entities source has no entries"),
            LoadError::MissingFromFull { set, name, ch } => write!(
                f,
                "{set} entity {name:?} (U+{:04X}) has no name in the full set",
                *ch as u32
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Unrecognized charset label passed to `Charset::from_str`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCharset(pub String);

impl fmt::Display for UnknownCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown charset: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCharset {}

/// Unrecognized label passed to `ReferenceSet::from_str`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownReferenceSet(pub String);

impl fmt::Display for UnknownReferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reference set: {:?}", self.0)
    }
}

impl std::error::Error for UnknownReferenceSet {}
