#![no_main]

use entities::{Charset, EntityTable, ReferenceSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let mode = ReferenceSet::ALL[usize::from(selector) % ReferenceSet::ALL.len()];
    let charset = match selector >> 4 {
        0..=5 => Charset::Utf8,
        6..=10 => Charset::Ascii,
        _ => Charset::Latin1,
    };
    let table = EntityTable::builtin();
    let escaped = table.escape(text, &charset, mode);
    assert!(escaped.len() >= text.len());
    assert_eq!(table.unescape(&escaped, false), text);
    assert_eq!(table.unescape(&escaped, true), text);
});
