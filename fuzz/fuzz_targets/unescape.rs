#![no_main]

use entities::{EntityTable, scan_reference};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let table = EntityTable::builtin();
    for strict in [false, true] {
        let out = table.unescape(text, strict);
        // Resolved references never expand; unresolved ones are copied as-is.
        assert!(out.len() <= text.len());
        if !text.contains('&') {
            assert_eq!(out, text);
        }
    }
    for (at, _) in text.match_indices('&') {
        if let Some(raw) = scan_reference(text, at, false) {
            assert!(raw.span.start == at && raw.body.end <= raw.span.end);
            assert!(text.is_char_boundary(raw.span.end));
        }
    }
});
