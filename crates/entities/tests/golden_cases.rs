use entities::{Charset, EntityTable, ReferenceSet};
use entities_test_support::fixtures::{CaseFile, FixtureStatus, load_case_dir};
use entities_test_support::{escape_text, first_mismatch};
use std::env;
use std::path::PathBuf;

struct CaseFilter(Option<String>);

impl CaseFilter {
    fn matches(&self, name: &str) -> bool {
        self.0.as_deref().is_none_or(|needle| name.contains(needle))
    }
}

fn case_filter() -> CaseFilter {
    CaseFilter(env::var("ENTITIES_CASE_FILTER").ok().filter(|v| !v.is_empty()))
}

fn case_files() -> Vec<(String, CaseFile)> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    load_case_dir(&root)
}

fn enforce(file: &str, name: &str, status: FixtureStatus, expected: &str, actual: &str) {
    let mismatch = first_mismatch(expected, actual);
    match (status, mismatch) {
        (FixtureStatus::Active, Some(diff)) => panic!(
            "{file}::{name} failed\n  actual: \"{}\"\n{diff}",
            escape_text(actual)
        ),
        (FixtureStatus::Xfail, None) => {
            panic!("{file}::{name} is marked xfail but now passes; promote it to active")
        }
        _ => {}
    }
}

#[test]
fn unescape_cases() {
    let table = EntityTable::builtin();
    let filter = case_filter();
    let mut ran = 0usize;
    for (file, cases) in case_files() {
        for case in &cases.unescape {
            if !filter.matches(&case.name) || case.status == FixtureStatus::Skip {
                continue;
            }
            ran += 1;
            let actual = table.unescape(&case.input, case.strict);
            enforce(&file, &case.name, case.status, &case.expected, &actual);
        }
    }
    if filter.0.is_none() {
        assert!(ran > 0, "no unescape cases ran");
    }
}

#[test]
fn escape_cases() {
    let table = EntityTable::builtin();
    let filter = case_filter();
    let mut ran = 0usize;
    for (file, cases) in case_files() {
        for case in &cases.escape {
            if !filter.matches(&case.name) || case.status == FixtureStatus::Skip {
                continue;
            }
            ran += 1;
            let mode: ReferenceSet = case
                .mode
                .parse()
                .unwrap_or_else(|err| panic!("{file}::{}: {err}", case.name));
            let charset: Charset = case
                .charset
                .parse()
                .unwrap_or_else(|err| panic!("{file}::{}: {err}", case.name));
            let actual = table.escape(&case.input, &charset, mode);
            enforce(&file, &case.name, case.status, &case.expected, &actual);

            // Every escape case must also decode back to its input.
            if case.status == FixtureStatus::Active {
                for strict in [false, true] {
                    let decoded = table.unescape(&actual, strict);
                    assert_eq!(
                        decoded, case.input,
                        "{file}::{} did not round-trip (strict={strict})",
                        case.name
                    );
                }
            }
        }
    }
    if filter.0.is_none() {
        assert!(ran > 0, "no escape cases ran");
    }
}
