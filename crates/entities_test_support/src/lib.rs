pub mod fixtures;

/// Render `text` with control characters and quotes made visible, for assertion messages.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{A0}' => out.push_str("\\u{A0}"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Describe the first differing character between two outputs, or `None` if equal.
pub fn first_mismatch(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let at = expected
        .char_indices()
        .zip(actual.chars())
        .find(|((_, e), a)| e != a)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    let context = |s: &str| {
        let start = floor_char_boundary(s, at.saturating_sub(8));
        let end = floor_char_boundary(s, (at + 8).min(s.len()));
        escape_text(&s[start..end])
    };
    Some(format!(
        "first mismatch at byte {at}\n  expected: \"{}\"\n    actual: \"{}\"",
        context(expected),
        context(actual)
    ))
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
