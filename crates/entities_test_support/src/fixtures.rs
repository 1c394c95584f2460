//! TOML case files for escape/unescape golden tests.
//!
//! ```toml
//! format = "entities-cases-v1"
//!
//! [[unescape]]
//! name = "named_amp"
//! input = "Tom &amp; Jerry"
//! expected = "Tom & Jerry"
//! strict = false          # optional
//! status = "active"       # optional: active | xfail | skip
//!
//! [[escape]]
//! name = "restricted_lt"
//! input = "<"
//! mode = "restricted"
//! charset = "utf-8"       # optional
//! expected = "&lt;"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const CASES_FORMAT_V1: &str = "entities-cases-v1";

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    #[default]
    Active,
    Xfail,
    Skip,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnescapeCase {
    pub name: String,
    pub input: String,
    pub expected: String,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub status: FixtureStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EscapeCase {
    pub name: String,
    pub input: String,
    pub mode: String,
    #[serde(default = "default_charset")]
    pub charset: String,
    pub expected: String,
    #[serde(default)]
    pub status: FixtureStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

fn default_charset() -> String {
    "utf-8".to_string()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    pub format: String,
    #[serde(default)]
    pub unescape: Vec<UnescapeCase>,
    #[serde(default)]
    pub escape: Vec<EscapeCase>,
}

pub fn load_case_file(path: &Path) -> CaseFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case file {path:?}: {err}"));
    let file: CaseFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse case file {path:?}: {err}"));
    assert_eq!(
        file.format, CASES_FORMAT_V1,
        "unsupported format in {path:?}"
    );
    assert!(
        !file.unescape.is_empty() || !file.escape.is_empty(),
        "case file {path:?} has no cases"
    );
    let mut names: Vec<&str> = file
        .unescape
        .iter()
        .map(|c| c.name.as_str())
        .chain(file.escape.iter().map(|c| c.name.as_str()))
        .collect();
    names.sort_unstable();
    if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
        panic!("duplicate case name '{}' in {path:?}", dup[0]);
    }
    for case in &file.unescape {
        assert!(
            case.status != FixtureStatus::Xfail || case.reason.is_some(),
            "xfail case '{}' in {path:?} needs a reason",
            case.name
        );
    }
    for case in &file.escape {
        assert!(
            case.status != FixtureStatus::Xfail || case.reason.is_some(),
            "xfail case '{}' in {path:?} needs a reason",
            case.name
        );
    }
    file
}

/// Load every `*.toml` case file in `dir`, sorted by file name.
pub fn load_case_dir(dir: &Path) -> Vec<(String, CaseFile)> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read case dir {dir:?}: {err}"))
        .map(|entry| {
            entry
                .unwrap_or_else(|err| panic!("failed to read entry in {dir:?}: {err}"))
                .path()
        })
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no case files in {dir:?}");
    paths
        .into_iter()
        .map(|path| {
            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = load_case_file(&path);
            (label, file)
        })
        .collect()
}
