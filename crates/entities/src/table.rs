//! Named character reference registry.
//!
//! Three reference sets are loaded once and never mutated:
//! - `Restricted`: the five XML-safe names (`quot`, `amp`, `apos`, `lt`, `gt`).
//! - `Base`: the common HTML names, historically decodable without a trailing `;`.
//! - `Full`: every single-codepoint HTML named reference.
//!
//! All three map codepoint -> canonical name for escaping. Only `Full` carries the
//! name -> codepoint index used for decoding.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{LoadError, UnknownReferenceSet};
use crate::source::parse_references;

/// Selects which named references govern escaping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceSet {
    Restricted,
    Base,
    Full,
}

impl ReferenceSet {
    pub const ALL: [ReferenceSet; 3] = [Self::Restricted, Self::Base, Self::Full];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Restricted => "restricted",
            Self::Base => "base",
            Self::Full => "full",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Restricted => 0,
            Self::Base => 1,
            Self::Full => 2,
        }
    }
}

impl fmt::Display for ReferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReferenceSet {
    type Err = UnknownReferenceSet;

    /// Accepts the set labels plus the legacy `xhtml` / `extended` mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("restricted") || label.eq_ignore_ascii_case("xhtml") {
            Ok(Self::Restricted)
        } else if label.eq_ignore_ascii_case("base") {
            Ok(Self::Base)
        } else if label.eq_ignore_ascii_case("full") || label.eq_ignore_ascii_case("extended") {
            Ok(Self::Full)
        } else {
            Err(UnknownReferenceSet(s.to_string()))
        }
    }
}

/// One `name` -> `ch` entry of a backing source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedReference {
    pub name: Box<str>,
    pub ch: char,
}

/// Raw text of the three backing sources.
#[derive(Clone, Copy, Debug)]
pub struct EntitySources<'a> {
    pub restricted: &'a str,
    pub base: &'a str,
    pub full: &'a str,
}

impl EntitySources<'static> {
    /// Sources compiled into the crate.
    pub const BUILTIN: Self = Self {
        restricted: include_str!("../data/entities-restricted.properties"),
        base: include_str!("../data/entities-base.properties"),
        full: include_str!("../data/entities-full.properties"),
    };
}

impl<'a> EntitySources<'a> {
    /// File names expected by [`EntityTable::load_dir`], in set order.
    pub const FILE_NAMES: [&'static str; 3] = [
        "entities-restricted.properties",
        "entities-base.properties",
        "entities-full.properties",
    ];

    fn get(&self, set: ReferenceSet) -> &'a str {
        match set {
            ReferenceSet::Restricted => self.restricted,
            ReferenceSet::Base => self.base,
            ReferenceSet::Full => self.full,
        }
    }
}

/// Immutable entity registry shared by the escaper and the decoder.
///
/// Invariant: every codepoint named by `Restricted` or `Base` also has a name in `Full`.
#[derive(Debug)]
pub struct EntityTable {
    by_name: HashMap<Box<str>, char>,
    by_char: [HashMap<char, Box<str>>; 3],
}

impl EntityTable {
    /// The process-wide table built from [`EntitySources::BUILTIN`].
    ///
    /// Built on first use; all callers observe the completed table. Corrupt built-in
    /// data is unrecoverable and panics.
    pub fn builtin() -> &'static EntityTable {
        static TABLE: OnceLock<EntityTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            EntityTable::load(&EntitySources::BUILTIN)
                .unwrap_or_else(|err| panic!("built-in entity data failed to load: {err}"))
        })
    }

    pub fn load(sources: &EntitySources<'_>) -> Result<Self, LoadError> {
        let full = parse_references(ReferenceSet::Full, sources.full)?;
        let mut by_name = HashMap::with_capacity(full.len());
        for entry in &full {
            by_name.insert(entry.name.clone(), entry.ch);
        }
        let full_by_char = canonical_names(full);

        let restricted_by_char = subset_names(ReferenceSet::Restricted, sources, &full_by_char)?;
        let base_by_char = subset_names(ReferenceSet::Base, sources, &full_by_char)?;

        let table = Self {
            by_name,
            by_char: [restricted_by_char, base_by_char, full_by_char],
        };
        log::debug!(
            target: "entities.table",
            "loaded entity table: {} names, {} restricted / {} base / {} full codepoints",
            table.by_name.len(),
            table.len(ReferenceSet::Restricted),
            table.len(ReferenceSet::Base),
            table.len(ReferenceSet::Full),
        );
        Ok(table)
    }

    /// Load the three sources named by [`EntitySources::FILE_NAMES`] from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let [restricted, base, full] = EntitySources::FILE_NAMES.map(|name| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
        });
        Self::load(&EntitySources {
            restricted: &restricted?,
            base: &base?,
            full: &full?,
        })
    }

    /// True iff `name` (without `&` and `;`) is in the full set. Case-sensitive.
    pub fn is_named_entity(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<char> {
        self.by_name.get(name).copied()
    }

    /// Canonical name for `ch` within `set`.
    pub fn reverse_lookup(&self, ch: char, set: ReferenceSet) -> Option<&str> {
        self.by_char[set.index()].get(&ch).map(|name| &**name)
    }

    pub fn contains(&self, ch: char, set: ReferenceSet) -> bool {
        self.by_char[set.index()].contains_key(&ch)
    }

    /// Number of distinct codepoints named by `set`.
    pub fn len(&self, set: ReferenceSet) -> usize {
        self.by_char[set.index()].len()
    }
}

fn subset_names(
    set: ReferenceSet,
    sources: &EntitySources<'_>,
    full_by_char: &HashMap<char, Box<str>>,
) -> Result<HashMap<char, Box<str>>, LoadError> {
    let refs = parse_references(set, sources.get(set))?;
    if let Some(orphan) = refs.iter().find(|r| !full_by_char.contains_key(&r.ch)) {
        return Err(LoadError::MissingFromFull {
            set,
            name: orphan.name.to_string(),
            ch: orphan.ch,
        });
    }
    Ok(canonical_names(refs))
}

/// Pick one name per codepoint: shortest, then lowercase-initial, then lexicographic.
fn canonical_names(refs: Vec<NamedReference>) -> HashMap<char, Box<str>> {
    let mut map: HashMap<char, Box<str>> = HashMap::with_capacity(refs.len());
    for NamedReference { name, ch } in refs {
        match map.get_mut(&ch) {
            Some(current) if name_rank(&name) < name_rank(current) => *current = name,
            Some(_) => {}
            None => {
                map.insert(ch, name);
            }
        }
    }
    map
}

fn name_rank(name: &str) -> (usize, bool, &str) {
    let upper_initial = name.as_bytes().first().is_some_and(u8::is_ascii_uppercase);
    (name.len(), upper_initial, name)
}
