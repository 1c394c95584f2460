pub const BLOCK_TEMPLATE: &str =
    "Tom &amp; Jerry &lt;3 caf&eacute; &#x1F600; &#169; &bogus; a & b &notin plain text. ";

pub const PLAIN_TEMPLATE: &str = "Plain paragraph text with no references at all, just words. ";

pub fn make_blocks(blocks: usize) -> String {
    repeat_template(BLOCK_TEMPLATE, blocks)
}

pub fn make_plain(blocks: usize) -> String {
    repeat_template(PLAIN_TEMPLATE, blocks)
}

/// Decoded text that exercises every escape path (names, literals, numeric fallback).
pub fn make_escape_input(blocks: usize) -> String {
    repeat_template("<p class=\"x\">caf\u{E9} \u{2603} & \u{1F600} \u{A0}done</p> ", blocks)
}

fn repeat_template(template: &str, blocks: usize) -> String {
    let mut text = String::with_capacity(template.len() * blocks);
    for _ in 0..blocks {
        text.push_str(template);
    }
    text
}
